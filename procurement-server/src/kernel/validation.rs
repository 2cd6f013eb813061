use {
    crate::api::RestError,
    procurement_api_types::FieldError,
    time::OffsetDateTime,
};

/// Collects every rejected field of a request before failing it as a whole.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, is_valid: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !is_valid {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Leading and trailing whitespace does not count towards the length.
    pub fn required_text(&mut self, field: &str, value: &str, label: &str) -> &mut Self {
        self.check(
            !value.trim().is_empty(),
            field,
            format!("{} is required", label),
        )
    }

    pub fn text_length(
        &mut self,
        field: &str,
        value: &str,
        min: usize,
        max: usize,
        label: &str,
    ) -> &mut Self {
        let value = value.trim();
        if value.is_empty() {
            return self.required_text(field, value, label);
        }
        let length = value.chars().count();
        self.check(
            (min..=max).contains(&length),
            field,
            format!("{} must be between {} and {} characters", label, min, max),
        )
    }

    pub fn max_length(
        &mut self,
        field: &str,
        value: Option<&str>,
        max: usize,
        label: &str,
    ) -> &mut Self {
        let length = value.map_or(0, |value| value.trim().chars().count());
        self.check(
            length <= max,
            field,
            format!("{} must not exceed {} characters", label, max),
        )
    }

    pub fn not_before(
        &mut self,
        field: &str,
        value: OffsetDateTime,
        threshold: OffsetDateTime,
        message: &str,
    ) -> &mut Self {
        self.check(value >= threshold, field, message)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(&mut self) -> Result<(), RestError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(RestError::ValidationError(std::mem::take(&mut self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::Duration,
    };

    #[test]
    fn test_collects_every_failure() {
        let result = Validator::new()
            .text_length("title", "abc", 5, 200, "Title")
            .text_length("description", "  ", 10, 2000, "Description")
            .check(false, "quantity", "Quantity must be a positive integer")
            .finish();
        assert_eq!(
            result,
            Err(RestError::ValidationError(vec![
                FieldError::new("title", "Title must be between 5 and 200 characters"),
                FieldError::new("description", "Description is required"),
                FieldError::new("quantity", "Quantity must be a positive integer"),
            ]))
        );
    }

    #[test]
    fn test_text_length_counts_characters_after_trimming() {
        let mut validator = Validator::new();
        validator.text_length("title", "  Öl ab  ", 5, 5, "Title");
        assert!(validator.is_valid());
        validator.text_length("title", "  Öl  ", 5, 5, "Title");
        assert!(!validator.is_valid());
    }

    #[test]
    fn test_optional_max_length() {
        let long = "x".repeat(1001);
        let result = Validator::new()
            .max_length("comments", None, 1000, "Comments")
            .max_length("comments", Some("fine"), 1000, "Comments")
            .finish();
        assert!(result.is_ok());
        let result = Validator::new()
            .max_length("comments", Some(long.as_str()), 1000, "Comments")
            .finish();
        assert_eq!(
            result,
            Err(RestError::ValidationError(vec![FieldError::new(
                "comments",
                "Comments must not exceed 1000 characters"
            )]))
        );
    }

    #[test]
    fn test_not_before_accepts_threshold() {
        let now = OffsetDateTime::now_utc();
        let mut validator = Validator::new();
        validator.not_before("end_date", now, now, "End date must be in the future");
        assert!(validator.is_valid());
        validator.not_before(
            "end_date",
            now - Duration::seconds(1),
            now,
            "End date must be in the future",
        );
        assert!(!validator.is_valid());
    }
}
