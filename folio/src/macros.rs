// All engine logs go to the `folio` target and compile away without the `tracing` feature.

#[cfg(feature = "tracing")]
macro_rules! flog {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "folio", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! flog {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! ftrace {
    ($($tt:tt)*) => { flog!(trace, $($tt)*) };
}

macro_rules! fdebug {
    ($($tt:tt)*) => { flog!(debug, $($tt)*) };
}

macro_rules! finfo {
    ($($tt:tt)*) => { flog!(info, $($tt)*) };
}

macro_rules! fwarn {
    ($($tt:tt)*) => { flog!(warn, $($tt)*) };
}
