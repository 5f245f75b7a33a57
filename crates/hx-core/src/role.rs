use core::fmt;

/// Which side of a node a port sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PortRole {
    /// Input/consumption point. At most one producer per port.
    Needs,
    /// Output/capability point. May feed any number of needs ports.
    Provides,
}

impl PortRole {
    pub fn label(self) -> &'static str {
        match self {
            PortRole::Needs => "needs",
            PortRole::Provides => "provides",
        }
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
