//! Parser and plugin configuration.
//!
//! Two kinds of settings live here:
//!
//! - [`ParserConfig`]: the k-mer width, the only knob that changes tokens.
//! - System variables: two global and two per-session scalars the host can
//!   read and set. They are accepted and stored but never consulted by the
//!   tokenizer.
//!
//! Numeric variables carry an inclusive range. Out-of-range writes are clamped
//! to the nearest bound with a warning, matching how the host treats them.

use aakmer_types::{ConfigError, SessionId, VarKind, VarValue};
use rustc_hash::FxHashMap;
use tracing::warn;

use crate::analyzer::kmer::{KmerWindower, DEFAULT_K};

/// Tokenizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// K-mer width in residues.
    /// Default: 10
    pub k: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { k: DEFAULT_K }
    }
}

impl ParserConfig {
    /// Validates the configuration and builds the windower it describes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroWindow` if `k` is zero.
    pub fn windower(&self) -> Result<KmerWindower, ConfigError> {
        KmerWindower::new(self.k)
    }
}

/// Lifetime of a variable's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// One value for the whole process
    Global,
    /// One value per host session
    Session,
}

/// Default and bounds of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDefault {
    /// Integer with inclusive `[min, max]`
    Long {
        /// Initial value
        default: i64,
        /// Lowest accepted value
        min: i64,
        /// Highest accepted value
        max: i64,
    },
    /// String
    Str(&'static str),
}

/// Declaration of one system variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysVarSpec {
    /// Name as the host shows it (without the plugin prefix).
    pub name: &'static str,
    /// Help text.
    pub comment: &'static str,
    /// Global or per-session.
    pub scope: Scope,
    /// Default value and bounds.
    pub default: VarDefault,
}

impl SysVarSpec {
    /// Kind of value this variable holds.
    pub const fn kind(&self) -> VarKind {
        match self.default {
            VarDefault::Long { .. } => VarKind::Long,
            VarDefault::Str(_) => VarKind::Str,
        }
    }

    /// Value a fresh scope starts with.
    pub fn default_value(&self) -> VarValue {
        match self.default {
            VarDefault::Long { default, .. } => VarValue::Long(default),
            VarDefault::Str(s) => VarValue::Str(s.to_owned()),
        }
    }

    /// Checks the kind of `value` and clamps numbers into range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the kinds differ.
    pub fn coerce(&self, value: VarValue) -> Result<VarValue, ConfigError> {
        match (self.default, value) {
            (VarDefault::Long { min, max, .. }, VarValue::Long(v)) => {
                let clamped = v.clamp(min, max);
                if clamped != v {
                    warn!(
                        variable = self.name,
                        requested = v,
                        stored = clamped,
                        "value out of range, clamped"
                    );
                }
                Ok(VarValue::Long(clamped))
            }
            (VarDefault::Str(_), v @ VarValue::Str(_)) => Ok(v),
            _ => Err(ConfigError::TypeMismatch {
                name: self.name,
                expected: self.kind(),
            }),
        }
    }
}

/// Global numeric variable.
pub const SYSVAR_ONE: SysVarSpec = SysVarSpec {
    name: "sysvar_one",
    comment: "Simple fulltext parser example system variable number one. Give a number.",
    scope: Scope::Global,
    default: VarDefault::Long {
        default: 77,
        min: 7,
        max: 777,
    },
};

/// Global string variable.
pub const SYSVAR_TWO: SysVarSpec = SysVarSpec {
    name: "sysvar_two",
    comment: "Simple fulltext parser example system variable number two. Give a string.",
    scope: Scope::Global,
    default: VarDefault::Str("simple sysvar two default"),
};

/// Per-session numeric variable.
pub const THDVAR_ONE: SysVarSpec = SysVarSpec {
    name: "thdvar_one",
    comment: "Simple fulltext parser example thread variable number one. Give a number.",
    scope: Scope::Session,
    default: VarDefault::Long {
        default: 88,
        min: 8,
        max: 888,
    },
};

/// Per-session string variable.
pub const THDVAR_TWO: SysVarSpec = SysVarSpec {
    name: "thdvar_two",
    comment: "Simple fulltext parser example thread variable number two. Give a string.",
    scope: Scope::Session,
    default: VarDefault::Str("simple thdvar two default"),
};

/// Every variable the plugin declares, in registration order.
pub const SYSTEM_VARIABLES: [SysVarSpec; 4] = [SYSVAR_ONE, SYSVAR_TWO, THDVAR_ONE, THDVAR_TWO];

/// Finds a variable declaration by name.
pub fn lookup(name: &str) -> Option<&'static SysVarSpec> {
    SYSTEM_VARIABLES.iter().find(|v| v.name == name)
}

/// Current values of every variable in one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSet {
    scope: Scope,
    values: FxHashMap<&'static str, VarValue>,
}

impl VariableSet {
    /// Creates a set holding the defaults of every variable in `scope`.
    pub fn with_defaults(scope: Scope) -> Self {
        let values = SYSTEM_VARIABLES
            .iter()
            .filter(|v| v.scope == scope)
            .map(|v| (v.name, v.default_value()))
            .collect();
        Self { scope, values }
    }

    /// Scope of this set.
    #[inline]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    fn spec(&self, name: &str) -> Result<&'static SysVarSpec, ConfigError> {
        lookup(name)
            .filter(|v| v.scope == self.scope)
            .ok_or_else(|| ConfigError::UnknownVariable(name.to_owned()))
    }

    /// Reads a variable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownVariable` if `name` is not declared in
    /// this scope.
    pub fn get(&self, name: &str) -> Result<&VarValue, ConfigError> {
        let spec = self.spec(name)?;
        self.values
            .get(spec.name)
            .ok_or_else(|| ConfigError::UnknownVariable(name.to_owned()))
    }

    /// Reads a numeric variable.
    ///
    /// # Errors
    ///
    /// Unknown name, or the variable is a string.
    pub fn get_long(&self, name: &str) -> Result<i64, ConfigError> {
        let spec = self.spec(name)?;
        match self.get(name)? {
            VarValue::Long(v) => Ok(*v),
            VarValue::Str(_) => Err(ConfigError::TypeMismatch {
                name: spec.name,
                expected: spec.kind(),
            }),
        }
    }

    /// Reads a string variable.
    ///
    /// # Errors
    ///
    /// Unknown name, or the variable is numeric.
    pub fn get_str(&self, name: &str) -> Result<&str, ConfigError> {
        let spec = self.spec(name)?;
        match self.get(name)? {
            VarValue::Str(s) => Ok(s),
            VarValue::Long(_) => Err(ConfigError::TypeMismatch {
                name: spec.name,
                expected: spec.kind(),
            }),
        }
    }

    /// Writes a variable and returns the value actually stored.
    ///
    /// # Errors
    ///
    /// Unknown name or kind mismatch. Out-of-range numbers are clamped, not
    /// rejected.
    pub fn set(&mut self, name: &str, value: VarValue) -> Result<&VarValue, ConfigError> {
        let spec = self.spec(name)?;
        let stored = spec.coerce(value)?;
        let slot = self.values.entry(spec.name).or_insert_with(|| spec.default_value());
        *slot = stored;
        Ok(&*slot)
    }

    /// Restores a variable to its default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownVariable` if `name` is not declared in
    /// this scope.
    pub fn reset(&mut self, name: &str) -> Result<(), ConfigError> {
        let spec = self.spec(name)?;
        self.values.insert(spec.name, spec.default_value());
        Ok(())
    }

    /// Iterates `(name, value)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &VarValue)> + '_ {
        SYSTEM_VARIABLES
            .iter()
            .filter_map(move |v| self.values.get(v.name).map(|val| (v.name, val)))
    }
}

/// Per-session variable values, keyed by session.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: FxHashMap<SessionId, VariableSet>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session with default values. Reopening keeps existing values.
    pub fn open(&mut self, id: SessionId) -> &mut VariableSet {
        self.sessions
            .entry(id)
            .or_insert_with(|| VariableSet::with_defaults(Scope::Session))
    }

    /// Closes a session. Returns false if it was not open.
    pub fn close(&mut self, id: SessionId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Variables of an open session.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownSession` if the session is not open.
    pub fn get(&self, id: SessionId) -> Result<&VariableSet, ConfigError> {
        self.sessions.get(&id).ok_or(ConfigError::UnknownSession(id))
    }

    /// Mutable variables of an open session.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownSession` if the session is not open.
    pub fn get_mut(&mut self, id: SessionId) -> Result<&mut VariableSet, ConfigError> {
        self.sessions
            .get_mut(&id)
            .ok_or(ConfigError::UnknownSession(id))
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True if no session is open.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_config_default() {
        let cfg = ParserConfig::default();
        assert_eq!(cfg.k, 10);
        assert_eq!(cfg.windower().unwrap().k(), 10);
        assert_eq!(ParserConfig { k: 0 }.windower(), Err(ConfigError::ZeroWindow));
    }

    #[test]
    fn globals_start_at_defaults() {
        let g = VariableSet::with_defaults(Scope::Global);
        assert_eq!(g.get_long("sysvar_one").unwrap(), 77);
        assert_eq!(g.get_str("sysvar_two").unwrap(), "simple sysvar two default");
        assert!(matches!(
            g.get("thdvar_one"),
            Err(ConfigError::UnknownVariable(_))
        ));
    }

    #[test]
    fn set_in_range() {
        let mut g = VariableSet::with_defaults(Scope::Global);
        assert_eq!(g.set("sysvar_one", VarValue::Long(100)).unwrap(), &VarValue::Long(100));
        assert_eq!(g.get_long("sysvar_one").unwrap(), 100);
    }

    #[test]
    fn set_clamps_to_bounds() {
        let mut g = VariableSet::with_defaults(Scope::Global);
        g.set("sysvar_one", VarValue::Long(1)).unwrap();
        assert_eq!(g.get_long("sysvar_one").unwrap(), 7);
        g.set("sysvar_one", VarValue::Long(10_000)).unwrap();
        assert_eq!(g.get_long("sysvar_one").unwrap(), 777);
    }

    #[test]
    fn kind_mismatch_rejected() {
        let mut g = VariableSet::with_defaults(Scope::Global);
        let err = g.set("sysvar_one", VarValue::Str("x".into())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TypeMismatch {
                name: "sysvar_one",
                expected: VarKind::Long
            }
        );
        assert!(g.get_long("sysvar_two").is_err());
        assert_eq!(g.get_long("sysvar_one").unwrap(), 77);
    }

    #[test]
    fn reset_restores_default() {
        let mut g = VariableSet::with_defaults(Scope::Global);
        g.set("sysvar_two", VarValue::Str("custom".into())).unwrap();
        g.reset("sysvar_two").unwrap();
        assert_eq!(g.get_str("sysvar_two").unwrap(), "simple sysvar two default");
    }

    #[test]
    fn iter_in_declaration_order() {
        let s = VariableSet::with_defaults(Scope::Session);
        let names: Vec<_> = s.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["thdvar_one", "thdvar_two"]);
    }

    #[test]
    fn sessions_are_independent() {
        let mut reg = SessionRegistry::new();
        reg.open(1).set("thdvar_one", VarValue::Long(500)).unwrap();
        reg.open(2);

        assert_eq!(reg.get(1).unwrap().get_long("thdvar_one").unwrap(), 500);
        assert_eq!(reg.get(2).unwrap().get_long("thdvar_one").unwrap(), 88);
        assert_eq!(reg.len(), 2);

        // Reopening keeps values.
        reg.open(1);
        assert_eq!(reg.get(1).unwrap().get_long("thdvar_one").unwrap(), 500);

        assert!(reg.close(1));
        assert!(!reg.close(1));
        assert_eq!(reg.get(1).unwrap_err(), ConfigError::UnknownSession(1));
    }

    #[test]
    fn session_clamps() {
        let mut reg = SessionRegistry::new();
        let s = reg.open(9);
        s.set("thdvar_one", VarValue::Long(-5)).unwrap();
        assert_eq!(s.get_long("thdvar_one").unwrap(), 8);
        assert!(reg.get_mut(10).is_err());
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(lookup("thdvar_two").map(|v| v.scope), Some(Scope::Session));
        assert_eq!(lookup("sysvar_one").map(|v| v.kind()), Some(VarKind::Long));
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn help_text_names_scope_and_kind() {
        assert_eq!(
            SYSVAR_ONE.comment,
            "Simple fulltext parser example system variable number one. Give a number."
        );
        assert_eq!(
            THDVAR_TWO.comment,
            "Simple fulltext parser example thread variable number two. Give a string."
        );
        for v in &SYSTEM_VARIABLES {
            let kind = match v.kind() {
                VarKind::Long => "Give a number.",
                VarKind::Str => "Give a string.",
            };
            assert!(v.comment.ends_with(kind), "{}", v.name);
        }
    }
}
