// Example: step the typing machine directly and print its timeline.
use folio::{TypingState, TypingTimings};

fn main() {
    let phrases = ["Ready to Innovate", "Building the Future", "Creating Solutions"];
    let timings = TypingTimings::default();

    let mut state = TypingState::fresh();
    let mut now_ms = timings.type_ms;

    // Two full phrases and the start of the third.
    for _ in 0..160 {
        let (next, delay) = state.next(&phrases, &timings);
        state = next;
        println!(
            "t={now_ms:>6}ms {:?} {:?}",
            state.phase,
            state.display(&phrases)
        );
        let Some(delay) = delay else {
            break;
        };
        now_ms += delay;
    }
}
