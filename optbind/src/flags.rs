//! The option set built for one command invocation.

use std::collections::BTreeMap;

use crate::env::Environment;
use crate::error::{OptbindError, OptbindResult};
use crate::fields::FieldDescriptor;
use crate::name::env_key;
use crate::opt::{Opt, OptState, ResolvedOpt};

/// Options of one invocation, in discovery order and indexed by name.
#[derive(Debug, Default)]
pub struct Flags<'a> {
    opts: Vec<Opt<'a>>,
    index: BTreeMap<String, usize>,
}

impl<'a> Flags<'a> {
    /// Builds the option set from discovered fields.
    ///
    /// # Errors
    ///
    /// Fails when a field carries a malformed `required` tag, derives an empty
    /// name, or derives a name already taken by an earlier field.
    pub fn from_fields<I>(fields: I) -> OptbindResult<Self>
    where
        I: IntoIterator<Item = FieldDescriptor<'a>>,
    {
        let mut flags = Self::default();
        for field in fields {
            flags.insert(Opt::from_descriptor(field)?)?;
        }
        Ok(flags)
    }

    fn insert(&mut self, opt: Opt<'a>) -> OptbindResult<()> {
        if let Some(existing) = self.get(opt.name()) {
            return Err(OptbindError::DuplicateOption {
                name: opt.name().to_owned(),
                first: existing.ident().to_owned(),
                second: opt.ident().to_owned(),
            });
        }
        self.index.insert(opt.name().to_owned(), self.opts.len());
        self.opts.push(opt);
        Ok(())
    }

    /// Looks up an option by derived name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Opt<'a>> {
        self.index.get(name).and_then(|&i| self.opts.get(i))
    }

    /// Looks up an option by derived name for writing.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Opt<'a>> {
        let i = *self.index.get(name)?;
        self.opts.get_mut(i)
    }

    /// Records a flag value for `name`, returning `false` if no such option
    /// exists.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        self.get_mut(name).map(|opt| opt.set(value)).is_some()
    }

    /// Iterates over the options in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Opt<'a>> {
        self.opts.iter()
    }

    /// Iterates over the option names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.opts.len()
    }

    /// Whether the set holds no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }

    /// Fills untouched options from `env`.
    ///
    /// Each option is looked up under [`env_key`] of its name. Options already
    /// set by a flag are left alone. Returns the number of values applied.
    pub fn apply_env<E>(&mut self, env: &E, prefix: Option<&str>) -> usize
    where
        E: Environment + ?Sized,
    {
        let mut applied = 0;
        for opt in self
            .opts
            .iter_mut()
            .filter(|opt| opt.state() == OptState::Untouched)
        {
            let key = env_key(opt.name(), prefix);
            if let Some(value) = env.lookup(&key)
                && opt.fallback(&value)
            {
                tracing::trace!(option = opt.name(), key = %key, "option taken from environment");
                applied += 1;
            }
        }
        applied
    }

    /// Verifies that every required option received a value.
    ///
    /// # Errors
    ///
    /// Returns [`OptbindError::MissingRequired`] naming the first untouched
    /// required option in discovery order.
    pub fn check_required(&self) -> OptbindResult<()> {
        match self
            .opts
            .iter()
            .find(|opt| opt.is_required() && opt.state() == OptState::Untouched)
        {
            Some(opt) => Err(OptbindError::MissingRequired {
                name: opt.name().to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Snapshots every option in discovery order.
    #[must_use]
    pub fn resolved(&self) -> Vec<ResolvedOpt> {
        self.opts.iter().map(Opt::resolved).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Options, discover};
    use anyhow::{Result, anyhow, ensure};
    use rstest::{fixture, rstest};
    use std::collections::HashMap;

    #[derive(Default)]
    struct ServeOpts {
        host: String,
        port: String,
        max_retry_count: String,
    }

    impl Options for ServeOpts {
        fn describe(&mut self) -> Vec<FieldDescriptor<'_>> {
            vec![
                FieldDescriptor::new("Host", &mut self.host),
                FieldDescriptor::new("Port", &mut self.port).with_required("true"),
                FieldDescriptor::new("MaxRetryCount", &mut self.max_retry_count),
            ]
        }
    }

    #[fixture]
    fn env() -> HashMap<String, String> {
        HashMap::from([
            ("PORT".to_owned(), "9090".to_owned()),
            ("MAX_RETRY_COUNT".to_owned(), "3".to_owned()),
        ])
    }

    #[rstest]
    fn keeps_discovery_order_and_sorted_names() -> Result<()> {
        let mut opts = ServeOpts::default();
        let flags = Flags::from_fields(discover(&mut opts))?;
        let order: Vec<_> = flags.iter().map(Opt::name).collect();
        ensure!(order == ["host", "port", "max-retry-count"], "order: {order:?}");
        let names: Vec<_> = flags.names().collect();
        ensure!(names == ["host", "max-retry-count", "port"], "names: {names:?}");
        ensure!(flags.len() == 3 && !flags.is_empty(), "len: {}", flags.len());
        Ok(())
    }

    #[rstest]
    fn flags_dominate_environment(env: HashMap<String, String>) -> Result<()> {
        let mut opts = ServeOpts::default();
        {
            let mut flags = Flags::from_fields(discover(&mut opts))?;
            ensure!(flags.set("port", "8080"), "port should be known");
            let applied = flags.apply_env(&env, None);
            ensure!(applied == 1, "applied: {applied}");
            let port = flags.get("port").ok_or_else(|| anyhow!("port missing"))?;
            ensure!(port.state() == OptState::FlagPassed, "state: {:?}", port.state());
            flags.check_required()?;
        }
        ensure!(opts.port == "8080", "port: {}", opts.port);
        ensure!(opts.max_retry_count == "3", "retries: {}", opts.max_retry_count);
        ensure!(opts.host.is_empty(), "host: {}", opts.host);
        Ok(())
    }

    #[rstest]
    fn environment_satisfies_required(env: HashMap<String, String>) -> Result<()> {
        let mut opts = ServeOpts::default();
        let mut flags = Flags::from_fields(discover(&mut opts))?;
        flags.apply_env(&env, None);
        flags.check_required()?;
        let resolved = flags.resolved();
        let port = resolved
            .iter()
            .find(|opt| opt.name == "port")
            .ok_or_else(|| anyhow!("port missing"))?;
        ensure!(port.state == OptState::EnvPassed, "state: {:?}", port.state);
        ensure!(port.value == "9090", "value: {}", port.value);
        Ok(())
    }

    #[rstest]
    fn prefixed_lookup_ignores_bare_keys(env: HashMap<String, String>) -> Result<()> {
        let mut opts = ServeOpts::default();
        let mut flags = Flags::from_fields(discover(&mut opts))?;
        ensure!(flags.apply_env(&env, Some("SVC_")) == 0, "bare keys must not match");
        Ok(())
    }

    #[test]
    fn missing_required_option_is_named() -> Result<()> {
        let mut opts = ServeOpts::default();
        let mut flags = Flags::from_fields(discover(&mut opts))?;
        flags.apply_env(&HashMap::<String, String>::new(), None);
        match flags.check_required() {
            Err(OptbindError::MissingRequired { name }) => {
                ensure!(name == "port", "name: {name}");
                Ok(())
            }
            other => Err(anyhow!("expected MissingRequired, got {other:?}")),
        }
    }

    #[test]
    fn unknown_names_are_reported() -> Result<()> {
        let mut opts = ServeOpts::default();
        let mut flags = Flags::from_fields(discover(&mut opts))?;
        ensure!(!flags.set("verbose", "1"), "verbose is not an option");
        Ok(())
    }

    #[test]
    fn duplicate_derived_names_are_rejected() {
        let (mut a, mut b) = (String::new(), String::new());
        let fields = vec![
            FieldDescriptor::new("ListenAddr", &mut a),
            FieldDescriptor::new("listen_addr", &mut b),
        ];
        match Flags::from_fields(fields) {
            Err(OptbindError::DuplicateOption {
                name,
                first,
                second,
            }) => {
                assert_eq!(name, "listen-addr");
                assert_eq!(first, "ListenAddr");
                assert_eq!(second, "listen_addr");
            }
            other => panic!("expected DuplicateOption, got {other:?}"),
        }
    }
}
