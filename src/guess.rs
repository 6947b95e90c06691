use subitize::settings::CountRange;

/// Digits typed toward a guess. Counts go up to two digits, so a lone `1`
/// may still become `12`; the entry completes on Enter, or by itself once no
/// further digit could stay inside the choices.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GuessInput {
    digits: String,
}

impl GuessInput {
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    /// Add a digit. Returns the finished guess when the entry is complete.
    pub fn push(&mut self, digit: char, choices: CountRange) -> Option<u32> {
        if !digit.is_ascii_digit() {
            return None;
        }
        let mut next = self.digits.clone();
        next.push(digit);
        let value: u32 = next.parse().ok()?;
        let complete = value.saturating_mul(10) > choices.max;
        if value > choices.max || (complete && value < choices.min) {
            return None;
        }

        if complete {
            self.digits.clear();
            Some(value)
        } else {
            self.digits = next;
            None
        }
    }

    /// Finish the entry as typed. Values outside the choices are dropped.
    pub fn submit(&mut self, choices: CountRange) -> Option<u32> {
        let value = self.digits.parse::<u32>().ok().filter(|v| choices.contains(*v));
        self.digits.clear();
        value
    }
}
