//! Emulation Loop State Machine
//!
//! Defines the phases a single command passes through and which transitions
//! between them are valid.

/// Phase of the emulation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopPhase {
    /// Waiting for a line from the transport
    #[default]
    Idle,
    /// Normalizing, dispatching and generating the response
    Processing,
    /// Writing the response, after any artificial delay
    Responding,
}

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopEvent {
    /// A complete line was read
    LineReceived,
    /// The read timed out with no data
    ReadTimedOut,
    /// The line was blank and produced no response
    LineIgnored,
    /// The handler produced a response
    ResponseReady,
    /// The response was written to the transport
    ResponseWritten,
}

/// Result of a transition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// Transition was valid and the phase changed (or stayed put)
    Success(LoopPhase),
    /// Transition was invalid from the current phase
    Invalid { from: LoopPhase, event: LoopEvent },
}

/// Tracks the loop phase and counts completed commands
#[derive(Debug, Default)]
pub struct PhaseMachine {
    phase: LoopPhase,
    responses_written: u64,
}

impl PhaseMachine {
    /// Create a new machine in the Idle phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Number of responses written so far
    pub fn responses_written(&self) -> u64 {
        self.responses_written
    }

    /// Apply an event, leaving the phase untouched if the transition is invalid
    pub fn process_event(&mut self, event: LoopEvent) -> TransitionResult {
        match next_phase(self.phase, event) {
            Some(next) => {
                if event == LoopEvent::ResponseWritten {
                    self.responses_written += 1;
                }
                self.phase = next;
                TransitionResult::Success(next)
            }
            None => TransitionResult::Invalid {
                from: self.phase,
                event,
            },
        }
    }
}

/// Phase reached from `phase` on `event`, if the transition is valid
fn next_phase(phase: LoopPhase, event: LoopEvent) -> Option<LoopPhase> {
    use LoopEvent::*;
    use LoopPhase::*;

    match (phase, event) {
        (Idle, ReadTimedOut) => Some(Idle),
        (Idle, LineReceived) => Some(Processing),
        (Processing, LineIgnored) => Some(Idle),
        (Processing, ResponseReady) => Some(Responding),
        (Responding, ResponseWritten) => Some(Idle),
        _ => None,
    }
}
