use log::warn;

use crate::error::SitemapError;

/// Applies the configured failure policy to sitemap rule violations.
///
/// In debug mode a failed check becomes a [`SitemapError::Validation`] that
/// aborts the render. Otherwise the message is logged at `WARN` level and the
/// caller is told the check failed so it can drop the offending data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    debug: bool,
}

impl Validator {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// A validator that turns every failure into an error.
    pub fn strict() -> Self {
        Self::new(true)
    }

    /// A validator that logs failures and lets rendering continue.
    pub fn lenient() -> Self {
        Self::new(false)
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Checks `condition`.
    ///
    /// Returns `Ok(true)` when it holds, `Ok(false)` when it failed and was
    /// logged, or `Err` when it failed in debug mode. The message is only built
    /// on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use sitemap_ext::core::validate::Validator;
    ///
    /// let priority = 4.2;
    /// let passed = Validator::lenient()
    ///     .ensure(priority <= 1.0, || format!("Priority {} invalid", priority))
    ///     .unwrap();
    /// assert!(!passed);
    ///
    /// let result = Validator::strict().ensure(priority <= 1.0, || format!("Priority {} invalid", priority));
    /// assert!(result.is_err());
    /// ```
    pub fn ensure<F>(&self, condition: bool, message: F) -> Result<bool, SitemapError>
    where
        F: FnOnce() -> String,
    {
        if condition {
            return Ok(true);
        }

        let message = message();
        if self.debug {
            Err(SitemapError::Validation(message))
        } else {
            warn!("{}", message);
            Ok(false)
        }
    }
}
