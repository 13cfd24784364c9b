//! Plugin descriptor and lifecycle.
//!
//! [`KmerPlugin`] is what a host adapter instantiates when the library is
//! loaded: it owns the parser, the global variables and the per-session
//! variables, and answers status queries. Loading and unloading never fail.

use core::fmt;

use aakmer_types::{ConfigError, ParseError, SessionId};
use tracing::info;

use crate::config::{ParserConfig, Scope, SessionRegistry, SysVarSpec, VariableSet, SYSTEM_VARIABLES};
use crate::parser::{KmerParser, ParserParam};
use crate::sink::TokenSink;
use crate::status::{self, StatusSnapshot};

/// Kind of plugin, as the host classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginType {
    /// Replacement full-text parser
    FullTextParser,
}

/// License the plugin declares to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum License {
    /// Proprietary
    Proprietary,
    /// GNU General Public License
    Gpl,
    /// BSD style
    Bsd,
}

/// Static description of the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Plugin type.
    pub kind: PluginType,
    /// Name the host registers the parser under.
    pub name: &'static str,
    /// Author string.
    pub author: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Declared license.
    pub license: License,
    /// Version, major in the high byte and minor in the low byte.
    pub version: u16,
    /// Status variable names, unprefixed.
    pub status_variables: &'static [&'static str],
    /// System variables.
    pub system_variables: &'static [SysVarSpec],
}

impl PluginDescriptor {
    /// Major version.
    #[inline]
    pub const fn major(&self) -> u8 {
        (self.version >> 8) as u8
    }

    /// Minor version.
    #[inline]
    pub const fn minor(&self) -> u8 {
        (self.version & 0xFF) as u8
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{} ({})",
            self.name,
            self.major(),
            self.minor(),
            self.description
        )
    }
}

/// Descriptor of the k-mer parser plugin.
pub const DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    kind: PluginType::FullTextParser,
    name: "aakmer_parser",
    author: "aakmer contributors",
    description: "Reduced-alphabet amino-acid k-mer full-text parser",
    license: License::Gpl,
    version: 0x0001,
    status_variables: &["static", "called"],
    system_variables: &SYSTEM_VARIABLES,
};

/// A loaded plugin instance.
#[derive(Debug)]
pub struct KmerPlugin {
    parser: KmerParser<'static>,
    globals: VariableSet,
    sessions: SessionRegistry,
}

impl KmerPlugin {
    /// Loads the plugin.
    ///
    /// # Errors
    ///
    /// Only an invalid `config` can fail; the defaults always load.
    pub fn init(config: &ParserConfig) -> Result<Self, ConfigError> {
        let parser = KmerParser::new(config)?;
        info!(
            plugin = DESCRIPTOR.name,
            version = DESCRIPTOR.version,
            k = parser.windower().k(),
            "plugin loaded"
        );
        Ok(Self {
            parser,
            globals: VariableSet::with_defaults(Scope::Global),
            sessions: SessionRegistry::new(),
        })
    }

    /// Unloads the plugin. Session state is dropped; the call counter keeps
    /// its value for the life of the process.
    pub fn deinit(self) {
        info!(
            plugin = DESCRIPTOR.name,
            open_sessions = self.sessions.len(),
            calls = self.parser.calls(),
            "plugin unloaded"
        );
    }

    /// The static descriptor.
    #[inline]
    pub const fn descriptor(&self) -> &'static PluginDescriptor {
        &DESCRIPTOR
    }

    /// The parser.
    #[inline]
    pub fn parser(&self) -> &KmerParser<'static> {
        &self.parser
    }

    /// Runs one full parse: per-query init, parse, per-query deinit.
    ///
    /// If the request names a session, the session is opened on first use.
    ///
    /// # Errors
    ///
    /// Whatever [`KmerParser::parse`] returns.
    pub fn parse<S>(&mut self, param: &ParserParam<'_>, sink: &mut S) -> Result<usize, ParseError>
    where
        S: TokenSink + ?Sized,
    {
        if let Some(id) = param.session {
            self.sessions.open(id);
        }
        self.parser.init(param)?;
        let result = self.parser.parse(param, sink);
        self.parser.deinit(param)?;
        result
    }

    /// Global variables.
    #[inline]
    pub fn globals(&self) -> &VariableSet {
        &self.globals
    }

    /// Mutable global variables.
    #[inline]
    pub fn globals_mut(&mut self) -> &mut VariableSet {
        &mut self.globals
    }

    /// Per-session variables.
    #[inline]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Mutable per-session variables.
    #[inline]
    pub fn sessions_mut(&mut self) -> &mut SessionRegistry {
        &mut self.sessions
    }

    /// Ends a session, discarding its variables.
    pub fn end_session(&mut self, id: SessionId) -> bool {
        self.sessions.close(id)
    }

    /// Current status variables.
    pub fn status(&self) -> StatusSnapshot {
        status::snapshot()
    }
}
