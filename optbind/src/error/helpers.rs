//! Classification helpers for [`OptbindError`].

use super::OptbindError;

impl OptbindError {
    /// Returns `true` when the error came from walking the command tree.
    ///
    /// Embedders typically print the available subcommands in response.
    ///
    /// # Examples
    ///
    /// ```
    /// use optbind::OptbindError;
    /// let err = OptbindError::NotEnoughArguments { command: "serve".into() };
    /// assert!(err.is_dispatch_error());
    /// ```
    #[must_use]
    pub const fn is_dispatch_error(&self) -> bool {
        matches!(
            self,
            Self::NotEnoughArguments { .. } | Self::UnknownSubcommand { .. }
        )
    }

    /// Returns `true` when the error stems from what the user typed or
    /// exported, as opposed to a defect in the command tree or an action
    /// failure.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::NotEnoughArguments { .. }
                | Self::UnknownSubcommand { .. }
                | Self::Flags(_)
                | Self::MissingRequired { .. }
                | Self::InvalidUnicode { .. }
        )
    }

    /// Returns `true` when the command tree or an options record is declared
    /// incorrectly.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRequired { .. }
                | Self::DuplicateOption { .. }
                | Self::InvalidOptionName { .. }
                | Self::MissingAction { .. }
        )
    }
}
