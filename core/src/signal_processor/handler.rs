use super::MatchSignal;

/// Anything that reacts to match lifecycle signals.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &MatchSignal);

    fn handle_signals(&mut self, signals: &[MatchSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
