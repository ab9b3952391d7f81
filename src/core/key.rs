//! Key events and the standard keypad layout.

use serde::{Deserialize, Serialize};

/// Function key value that resets the calculator.
pub const CLEAR: &str = "clear";

/// Action key value that evaluates the expression.
pub const EQUALS: &str = "equals";

/// Category of a key press.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Number,
    Operator,
    Function,
    Action,
}

/// A single key press. Produced by the presentation layer.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct KeyEvent {
    pub value: String,
    pub kind: KeyKind,
}

impl KeyEvent {
    pub fn new(value: impl Into<String>, kind: KeyKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::new(value, KeyKind::Number)
    }

    pub fn operator(value: impl Into<String>) -> Self {
        Self::new(value, KeyKind::Operator)
    }

    pub fn clear() -> Self {
        Self::new(CLEAR, KeyKind::Function)
    }

    pub fn equals() -> Self {
        Self::new(EQUALS, KeyKind::Action)
    }

    /// Whether this key feeds text into the expression.
    pub fn is_input(&self) -> bool {
        matches!(self.kind, KeyKind::Number | KeyKind::Operator)
    }
}

/// One button of a keypad layout.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct KeyDef {
    /// Glyph shown on the button
    pub label: String,
    /// Value carried by the emitted event
    pub value: String,
    pub kind: KeyKind,
    /// Number of grid columns the button spans
    pub span: u8,
}

impl KeyDef {
    fn new(label: &str, value: &str, kind: KeyKind) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            kind,
            span: 1,
        }
    }

    fn wide(mut self) -> Self {
        self.span = 2;
        self
    }

    /// Event emitted when this button is pressed.
    pub fn event(&self) -> KeyEvent {
        KeyEvent::new(self.value.clone(), self.kind)
    }
}

/// Static keypad configuration, laid out row by row on a 4-column grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keypad {
    keys: Vec<KeyDef>,
}

impl Keypad {
    /// The standard layout: clear, grouping and the four operators around
    /// a digit block, with a double-width zero.
    ///
    /// `(` and `.` are number keys because they begin an operand: on a
    /// fresh display or after a result they start a new expression, so `(`
    /// shows `(` rather than `0(`. Grouping layouts that tag `(` as an
    /// operator get the implicit leading zero instead. `)` is an operator
    /// key.
    pub fn standard() -> Self {
        use KeyKind::{Action, Function, Number, Operator};

        let keys = vec![
            KeyDef::new("C", CLEAR, Function),
            KeyDef::new("(", "(", Number),
            KeyDef::new(")", ")", Operator),
            KeyDef::new("÷", "/", Operator),
            KeyDef::new("7", "7", Number),
            KeyDef::new("8", "8", Number),
            KeyDef::new("9", "9", Number),
            KeyDef::new("×", "*", Operator),
            KeyDef::new("4", "4", Number),
            KeyDef::new("5", "5", Number),
            KeyDef::new("6", "6", Number),
            KeyDef::new("-", "-", Operator),
            KeyDef::new("1", "1", Number),
            KeyDef::new("2", "2", Number),
            KeyDef::new("3", "3", Number),
            KeyDef::new("+", "+", Operator),
            KeyDef::new("0", "0", Number).wide(),
            KeyDef::new(".", ".", Number),
            KeyDef::new("=", EQUALS, Action),
        ];

        Self { keys }
    }

    pub fn keys(&self) -> &[KeyDef] {
        &self.keys
    }

    /// Find a button by the glyph printed on it.
    pub fn by_label(&self, label: &str) -> Option<&KeyDef> {
        self.keys.iter().find(|k| k.label == label)
    }

    /// Find a button by the value it emits.
    pub fn by_value(&self, value: &str) -> Option<&KeyDef> {
        self.keys.iter().find(|k| k.value == value)
    }

    /// Translate a string of labels or values into events, one per char.
    ///
    /// Characters with no matching key are skipped.
    pub fn events_for(&self, input: &str) -> Vec<KeyEvent> {
        input
            .chars()
            .filter_map(|c| {
                let mut buf = [0u8; 4];
                let s: &str = c.encode_utf8(&mut buf);
                self.by_label(s).or_else(|| self.by_value(s))
            })
            .map(KeyDef::event)
            .collect()
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::standard()
    }
}
