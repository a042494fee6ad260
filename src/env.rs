use serde::Serialize;

/// Which compiler-flag list of the build environment a flag lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagScope {
    C,
    Cxx,
    Link,
}

impl FlagScope {
    pub fn as_str(self) -> &'static str {
        match self {
            FlagScope::C => "cflags",
            FlagScope::Cxx => "cxxflags",
            FlagScope::Link => "linkflags",
        }
    }
}

/// The host build tool's environment handle: one ordered compiler-flag list
/// per scope.
///
/// Appends are append-only. Order follows call order, existing entries are
/// never touched, and nothing deduplicates, so applying the same patch twice
/// leaves its flags in twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildEnv {
    cflags: Vec<String>,
    cxxflags: Vec<String>,
    linkflags: Vec<String>,
}

impl BuildEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append<I, S>(&mut self, scope: FlagScope, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_mut(scope).extend(flags.into_iter().map(Into::into));
    }

    pub fn flags(&self, scope: FlagScope) -> &[String] {
        match scope {
            FlagScope::C => &self.cflags,
            FlagScope::Cxx => &self.cxxflags,
            FlagScope::Link => &self.linkflags,
        }
    }

    fn list_mut(&mut self, scope: FlagScope) -> &mut Vec<String> {
        match scope {
            FlagScope::C => &mut self.cflags,
            FlagScope::Cxx => &mut self.cxxflags,
            FlagScope::Link => &mut self.linkflags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order_and_existing_entries() {
        let mut env = BuildEnv::new();
        env.append(FlagScope::Cxx, ["-Os"]);
        env.append(FlagScope::Cxx, ["-Wno-volatile", "-fpermissive"]);
        assert_eq!(
            env.flags(FlagScope::Cxx),
            ["-Os", "-Wno-volatile", "-fpermissive"]
        );
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let mut env = BuildEnv::new();
        env.append(FlagScope::Cxx, ["-fpermissive"]);
        env.append(FlagScope::Cxx, ["-fpermissive"]);
        assert_eq!(env.flags(FlagScope::Cxx), ["-fpermissive", "-fpermissive"]);
    }

    #[test]
    fn test_scopes_are_independent() {
        let mut env = BuildEnv::new();
        env.append(FlagScope::C, ["-std=gnu17"]);
        env.append(FlagScope::Link, ["-Wl,--gc-sections"]);
        assert!(env.flags(FlagScope::Cxx).is_empty());
        assert_eq!(env.flags(FlagScope::C), ["-std=gnu17"]);
        assert_eq!(env.flags(FlagScope::Link), ["-Wl,--gc-sections"]);
    }
}
