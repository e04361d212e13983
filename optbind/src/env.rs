//! Sources consulted for environment fallback values.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only view of environment variables.
pub trait Environment {
    /// Returns the value of `key`, or `None` when it is not set.
    ///
    /// A variable that is set to the empty string is present.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
///
/// Variables holding data that is not valid Unicode are reported as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_helpers::env as test_env;

    #[test]
    fn process_env_sees_set_and_empty_variables() {
        let _scope = test_env::scope_with(|lock| {
            vec![
                lock.set_var("OPTBIND_ENV_PRESENT", "value"),
                lock.set_var("OPTBIND_ENV_EMPTY", ""),
                lock.remove_var("OPTBIND_ENV_ABSENT"),
            ]
        });
        assert_eq!(
            ProcessEnv.lookup("OPTBIND_ENV_PRESENT").as_deref(),
            Some("value")
        );
        assert_eq!(ProcessEnv.lookup("OPTBIND_ENV_EMPTY").as_deref(), Some(""));
        assert_eq!(ProcessEnv.lookup("OPTBIND_ENV_ABSENT"), None);
    }

    #[cfg(unix)]
    #[test]
    fn process_env_treats_non_unicode_values_as_absent() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let _scope = test_env::scope_with(|lock| {
            vec![lock.set_var("OPTBIND_ENV_RAW", OsStr::from_bytes(&[0x66, 0xff]))]
        });
        assert!(std::env::var_os("OPTBIND_ENV_RAW").is_some());
        assert_eq!(ProcessEnv.lookup("OPTBIND_ENV_RAW"), None);
    }

    #[test]
    fn maps_act_as_environments() {
        let hashed = HashMap::from([("PORT".to_owned(), "80".to_owned())]);
        let ordered = BTreeMap::from([("PORT".to_owned(), "81".to_owned())]);
        assert_eq!(hashed.lookup("PORT").as_deref(), Some("80"));
        assert_eq!((&ordered).lookup("PORT").as_deref(), Some("81"));
        assert_eq!(ordered.lookup("HOST"), None);
    }
}
