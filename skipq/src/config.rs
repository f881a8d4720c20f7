//! Construction-time configuration.

use crate::Error;

/// Hard limit on the extra height of a tower.
///
/// Heights are drawn from the trailing ones of a single `u32`, so no draw can
/// exceed this value.
pub const MAX_HEIGHT: u8 = 32;

/// Skip list configuration.
///
/// # Example
///
/// ```
/// use skipq::Config;
///
/// let config = Config::default().max_height(12);
/// assert!(config.validate().is_ok());
/// assert!(Config::default().max_height(33).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Cap on the extra height of a new tower. A tower occupies at most
    /// `max_height + 1` rows. Zero degrades the list to a single sorted row.
    pub max_height: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_height: MAX_HEIGHT,
        }
    }
}

impl Config {
    /// Returns the config with `max_height` replaced.
    #[inline]
    pub const fn max_height(mut self, max_height: u8) -> Self {
        self.max_height = max_height;
        self
    }

    /// Checks the config, rejecting a cap above [`MAX_HEIGHT`].
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_height > MAX_HEIGHT {
            return Err(Error::InvalidMaxHeight {
                requested: self.max_height,
                limit: MAX_HEIGHT,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert_eq!(config.max_height, MAX_HEIGHT);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_is_valid() {
        assert_eq!(Config::default().max_height(0).validate(), Ok(()));
    }

    #[test]
    fn above_limit_rejected() {
        assert_eq!(
            Config::default().max_height(MAX_HEIGHT + 1).validate(),
            Err(Error::InvalidMaxHeight {
                requested: MAX_HEIGHT + 1,
                limit: MAX_HEIGHT,
            })
        );
    }
}
