//! Bounded input fields for the prediction form

/// Integer input clamped to `[min, max]`
#[derive(Debug, Clone, PartialEq)]
pub struct NumberInput {
    pub value: i64,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

impl NumberInput {
    pub fn new(value: i64, min: i64, max: i64, step: i64) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
            step,
        }
    }

    pub fn increment(&mut self) {
        self.value = (self.value + self.step).clamp(self.min, self.max);
    }

    pub fn decrement(&mut self) {
        self.value = (self.value - self.step).clamp(self.min, self.max);
    }

    /// Typed digit; the value may leave its bounds until [`Self::commit`]
    pub fn push_digit(&mut self, digit: u32) {
        let next = self.value.saturating_mul(10).saturating_add(digit as i64);
        // Cap runaway typing well before overflow
        if next <= self.max.saturating_mul(10) {
            self.value = next;
        }
    }

    pub fn pop_digit(&mut self) {
        self.value /= 10;
    }

    /// Pull the value back into bounds
    pub fn commit(&mut self) {
        self.value = self.value.clamp(self.min, self.max);
    }

    pub fn in_bounds(&self) -> bool {
        (self.min..=self.max).contains(&self.value)
    }
}

/// One of a fixed set of options
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceInput {
    pub options: &'static [&'static str],
    pub selected: usize,
}

impl ChoiceInput {
    pub fn new(options: &'static [&'static str]) -> Self {
        Self {
            options,
            selected: 0,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.options.len().max(1);
    }

    pub fn previous(&mut self) {
        let len = self.options.len().max(1);
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn value(&self) -> &'static str {
        self.options.get(self.selected).copied().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Number(NumberInput),
    Text(String),
    Choice(ChoiceInput),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub fn number(label: &'static str, input: NumberInput) -> Self {
        Self {
            label,
            kind: FieldKind::Number(input),
        }
    }

    pub fn text(label: &'static str, value: &str) -> Self {
        Self {
            label,
            kind: FieldKind::Text(value.to_string()),
        }
    }

    pub fn choice(label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            label,
            kind: FieldKind::Choice(ChoiceInput::new(options)),
        }
    }

    /// Current value as display text
    pub fn display(&self) -> String {
        match &self.kind {
            FieldKind::Number(n) => n.value.to_string(),
            FieldKind::Text(s) => s.clone(),
            FieldKind::Choice(c) => format!("‹ {} ›", c.value()),
        }
    }

    /// Bounds hint shown next to numeric fields
    pub fn hint(&self) -> Option<String> {
        match &self.kind {
            FieldKind::Number(n) => Some(format!("{}–{}", n.min, n.max)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_steps_stay_in_bounds() {
        let mut area = NumberInput::new(9950, 500, 10000, 100);
        area.increment();
        assert_eq!(area.value, 10000);
        area.increment();
        assert_eq!(area.value, 10000);

        let mut garage = NumberInput::new(0, 0, 5, 1);
        garage.decrement();
        assert_eq!(garage.value, 0);
    }

    #[test]
    fn test_typed_value_clamped_on_commit() {
        let mut bedrooms = NumberInput::new(3, 1, 10, 1);
        bedrooms.pop_digit();
        assert_eq!(bedrooms.value, 0);
        bedrooms.push_digit(4);
        bedrooms.push_digit(2);
        assert_eq!(bedrooms.value, 42);
        assert!(!bedrooms.in_bounds());

        bedrooms.commit();
        assert_eq!(bedrooms.value, 10);
    }

    #[test]
    fn test_typing_is_capped() {
        let mut stories = NumberInput::new(1, 1, 4, 1);
        for _ in 0..10 {
            stories.push_digit(9);
        }
        assert!(stories.value <= 40);
    }

    #[test]
    fn test_choice_wraps() {
        const OPTIONS: &[&str] = &["Excellent", "Good", "Average"];
        let mut condition = ChoiceInput::new(OPTIONS);
        condition.previous();
        assert_eq!(condition.value(), "Average");
        condition.next();
        assert_eq!(condition.value(), "Excellent");
    }
}
