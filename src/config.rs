use crate::outcome::Exhausted;

/// Safety bounds shared by both recognizers.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Limits {
    /// Longest input either recognizer will look at.
    pub max_length: usize,
    /// Most items one Earley set may hold.
    pub max_states: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits { max_length: 1000, max_states: 10000 }
    }
}

impl Limits {
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    pub(crate) fn check_length(&self, len: usize) -> Result<(), Exhausted> {
        if len > self.max_length {
            Err(Exhausted::InputTooLong { len, limit: self.max_length })
        } else {
            Ok(())
        }
    }
}
