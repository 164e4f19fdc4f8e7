//! Well-known providers offered even when the host does not run them.

use crate::models::{Invocation, Provider};

/// A catalogue entry.
pub struct KnownProvider {
    pub name: &'static str,
    pub command: &'static str,
    pub args: &'static [&'static str],
    pub capabilities: &'static [&'static str],
    /// Marks the entry installed when a discovered server name contains it.
    pub match_hint: &'static str,
}

pub const KNOWN_PROVIDERS: &[KnownProvider] = &[
    KnownProvider {
        name: "context7",
        command: "npx",
        args: &["-y", "@upstash/context7-mcp"],
        capabilities: &["docs", "context", "search"],
        match_hint: "context7",
    },
    KnownProvider {
        name: "memory-keeper",
        command: "npx",
        args: &["-y", "mcp-memory-keeper"],
        capabilities: &["memory", "context", "persistence"],
        match_hint: "memory",
    },
    KnownProvider {
        name: "github",
        command: "npx",
        args: &["-y", "@modelcontextprotocol/server-github"],
        capabilities: &["github", "issues", "repos"],
        match_hint: "github",
    },
];

impl KnownProvider {
    /// Build the provider, marking it installed if any discovered name
    /// contains the match hint.
    pub fn to_provider(&self, discovered: &[Provider]) -> Provider {
        Provider {
            name: self.name.to_string(),
            invocation: Invocation {
                command: self.command.to_string(),
                args: self.args.iter().map(|a| a.to_string()).collect(),
                env: Default::default(),
            },
            capabilities: self.capabilities.iter().map(|c| c.to_string()).collect(),
            installed: discovered.iter().any(|p| p.name.contains(self.match_hint)),
        }
    }
}
