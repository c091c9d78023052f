use crate::config::BroadcastConfig;
use crate::host::{ServerHandle, ServerRegistry};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub const SERVER_SEPARATOR: char = ',';

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    #[error("Usage: /broadcast [server1,server2,...] <message>")]
    Usage,
    #[error("Error: No servers specified. Use: /broadcast <server1,server2,...> <message>")]
    NoServersSpecified,
    #[error("Error: No valid servers specified")]
    NoValidServers,
}

/// The servers one broadcast goes to, in the order they were named.
/// A server named twice appears twice.
#[derive(Clone, Default)]
pub struct TargetSet {
    names: Vec<String>,
    servers: Vec<Arc<dyn ServerHandle>>,
}

impl TargetSet {
    fn push(&mut self, name: String, server: Arc<dyn ServerHandle>) {
        self.names.push(name);
        self.servers.push(server);
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn servers(&self) -> &[Arc<dyn ServerHandle>] {
        &self.servers
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Names joined with `", "`, as shown in logs.
    pub fn describe(&self) -> String {
        self.names.join(", ")
    }
}

impl fmt::Debug for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.names).finish()
    }
}

#[derive(Debug)]
pub struct Resolution {
    pub targets: TargetSet,
    pub message: String,
}

/// Whether the first argument should be read as a server list rather than
/// as the start of the message.
pub fn is_server_list(token: &str, registry: &dyn ServerRegistry) -> bool {
    token.contains(SERVER_SEPARATOR) || registry.server_by_name(token).is_some()
}

/// Splits `/broadcast` arguments into target servers and message text.
///
/// `args[0]` is a server list if it contains a comma or names a known
/// server. Unknown names in the list are dropped. Without a server list the
/// whole input is the message and the default behavior decides the targets.
pub fn resolve<S: AsRef<str>>(
    args: &[S],
    config: &BroadcastConfig,
    registry: &dyn ServerRegistry,
) -> Result<Resolution, TargetError> {
    let Some((first, rest)) = args.split_first() else {
        return Err(TargetError::Usage);
    };
    let first = first.as_ref();

    let mut targets = TargetSet::default();
    let message;

    if is_server_list(first, registry) {
        for name in first.split(SERVER_SEPARATOR).map(str::trim) {
            if let Some(server) = registry.server_by_name(name) {
                targets.push(name.to_string(), server);
            }
        }
        message = join(rest);
    } else {
        if !config.default_behavior_is_all {
            return Err(TargetError::NoServersSpecified);
        }
        for server in registry.all_servers() {
            targets.push(server.name().to_string(), server);
        }
        message = join(args);
    }

    // With the default behavior set to all, an explicit list that matched
    // nothing still goes through with no targets.
    if targets.is_empty() && !config.default_behavior_is_all {
        return Err(TargetError::NoValidServers);
    }

    Ok(Resolution { targets, message })
}

fn join<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Recipient;

    struct Server(&'static str);

    impl ServerHandle for Server {
        fn name(&self) -> &str {
            self.0
        }

        fn connected_players(&self) -> Vec<Arc<dyn Recipient>> {
            Vec::new()
        }
    }

    struct Registry(Vec<Arc<dyn ServerHandle>>);

    impl Registry {
        fn new(names: &[&'static str]) -> Self {
            Registry(
                names
                    .iter()
                    .map(|name| Arc::new(Server(*name)) as Arc<dyn ServerHandle>)
                    .collect(),
            )
        }
    }

    impl ServerRegistry for Registry {
        fn all_servers(&self) -> Vec<Arc<dyn ServerHandle>> {
            self.0.clone()
        }

        fn server_by_name(&self, name: &str) -> Option<Arc<dyn ServerHandle>> {
            self.0.iter().find(|server| server.name() == name).cloned()
        }
    }

    fn default_all() -> BroadcastConfig {
        BroadcastConfig::default()
    }

    fn explicit_only() -> BroadcastConfig {
        BroadcastConfig {
            default_behavior_is_all: false,
            ..Default::default()
        }
    }

    #[test]
    fn no_arguments_is_usage_error() {
        let registry = Registry::new(&["lobby"]);
        let args: [&str; 0] = [];
        let err = resolve(&args, &default_all(), &registry).unwrap_err();
        assert_eq!(err, TargetError::Usage);
    }

    #[test]
    fn server_list_with_blank_and_padded_names() {
        let registry = Registry::new(&["survival", "nether", "lobby"]);
        let args = ["survival, ,nether ", "Server", "restart", "soon"];
        let resolution = resolve(&args, &explicit_only(), &registry).unwrap();
        assert_eq!(resolution.targets.names(), ["survival", "nether"]);
        assert_eq!(resolution.targets.len(), 2);
        assert_eq!(resolution.message, "Server restart soon");
    }

    #[test]
    fn trailing_separator_marks_server_list() {
        let registry = Registry::new(&["survival", "nether"]);
        let args = ["survival,", " nether ", "Server", "restart", "soon"];
        let resolution = resolve(&args, &explicit_only(), &registry).unwrap();
        assert_eq!(resolution.targets.names(), ["survival"]);
        // Only the first argument is a server list; the rest is message text.
        assert_eq!(resolution.message, " nether  Server restart soon");
    }

    #[test]
    fn keeps_order_and_duplicates_drops_unknown() {
        let registry = Registry::new(&["a", "b", "c"]);
        let args = ["c,x,a,c,B", "hi"];
        let resolution = resolve(&args, &explicit_only(), &registry).unwrap();
        assert_eq!(resolution.targets.names(), ["c", "a", "c"]);
        assert_eq!(resolution.targets.describe(), "c, a, c");
    }

    #[test]
    fn single_known_server_is_a_list() {
        let registry = Registry::new(&["lobby", "pvp"]);
        let resolution = resolve(&["pvp", "fight"], &default_all(), &registry).unwrap();
        assert_eq!(resolution.targets.names(), ["pvp"]);
        assert_eq!(resolution.message, "fight");
    }

    #[test]
    fn server_list_without_message() {
        let registry = Registry::new(&["lobby"]);
        let resolution = resolve(&["lobby"], &explicit_only(), &registry).unwrap();
        assert_eq!(resolution.targets.names(), ["lobby"]);
        assert_eq!(resolution.message, "");
    }

    #[test]
    fn plain_message_goes_to_all_servers() {
        let registry = Registry::new(&["lobby", "pvp", "creative"]);
        let resolution = resolve(&["hello", "world"], &default_all(), &registry).unwrap();
        assert_eq!(resolution.targets.names(), ["lobby", "pvp", "creative"]);
        assert_eq!(resolution.message, "hello world");
    }

    #[test]
    fn plain_message_without_default_all_fails() {
        let registry = Registry::new(&["lobby"]);
        let err = resolve(&["hello"], &explicit_only(), &registry).unwrap_err();
        assert_eq!(err, TargetError::NoServersSpecified);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let registry = Registry::new(&["lobby"]);
        let err = resolve(&["Lobby", "hi"], &explicit_only(), &registry).unwrap_err();
        assert_eq!(err, TargetError::NoServersSpecified);
    }

    #[test]
    fn unresolved_list_without_default_all_fails() {
        let registry = Registry::new(&["lobby"]);
        let err = resolve(&["nope,missing", "hi"], &explicit_only(), &registry).unwrap_err();
        assert_eq!(err, TargetError::NoValidServers);
    }

    #[test]
    fn unresolved_list_with_default_all_is_empty() {
        let registry = Registry::new(&["lobby"]);
        let resolution = resolve(&["nope,", "hi"], &default_all(), &registry).unwrap();
        assert!(resolution.targets.is_empty());
        assert_eq!(resolution.targets.describe(), "");
        assert_eq!(resolution.message, "hi");
    }
}
