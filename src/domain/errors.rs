/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Code,
    Day,
    Hour,
    Minute,
    Name,
    Agreement,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Code => "code",
            Field::Day => "day",
            Field::Hour => "hour",
            Field::Minute => "minute",
            Field::Name => "name",
            Field::Agreement => "agree",
        }
    }
}

/// Client-side validation failures, one message per field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(Field, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure. A field keeps only the first message reported for it.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        if self.message_for(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field.name(), message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub type ValidationResult<T> = Result<T, ValidationErrors>;
