//! Dispatch table - maps command keys to handler kinds

use std::collections::HashMap;

/// Every command family the emulator knows how to answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// M105
    ReportTemperature,
    /// M114
    ReportPosition,
    /// M115
    ReportFirmware,
    /// M104, M109
    SetExtruderTemperature,
    /// M140, M190
    SetBedTemperature,
    /// A
    Echo,
    /// N, when a framed line survives normalization
    ChecksumLine,
    /// G4
    Dwell,
    /// M20
    ListSdCard,
    /// M21
    InitSdCard,
    /// SLOW
    RunSlow,
    /// FAST
    RunFast,
}

/// Immutable mapping from dispatch key to handler kind
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    entries: HashMap<&'static str, CommandKind>,
}

impl DispatchTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with every command the emulator supports
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register("M105", CommandKind::ReportTemperature);
        table.register("M114", CommandKind::ReportPosition);
        table.register("M115", CommandKind::ReportFirmware);
        table.register("M104", CommandKind::SetExtruderTemperature);
        table.register("M109", CommandKind::SetExtruderTemperature);
        table.register("M140", CommandKind::SetBedTemperature);
        table.register("M190", CommandKind::SetBedTemperature);
        table.register("A", CommandKind::Echo);
        table.register("N", CommandKind::ChecksumLine);
        table.register("G4", CommandKind::Dwell);
        table.register("M20", CommandKind::ListSdCard);
        table.register("M21", CommandKind::InitSdCard);
        table.register("SLOW", CommandKind::RunSlow);
        table.register("FAST", CommandKind::RunFast);
        table
    }

    /// Register a handler for a key, returning the kind it replaced
    pub fn register(&mut self, key: &'static str, kind: CommandKind) -> Option<CommandKind> {
        self.entries.insert(key, kind)
    }

    /// Look up a key (exact, case-sensitive)
    pub fn lookup(&self, key: &str) -> Option<CommandKind> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = DispatchTable::standard();
        assert_eq!(table.len(), 14);
        assert_eq!(table.lookup("M105"), Some(CommandKind::ReportTemperature));
        assert_eq!(table.lookup("M109"), Some(CommandKind::SetExtruderTemperature));
        assert_eq!(table.lookup("M190"), Some(CommandKind::SetBedTemperature));
        assert_eq!(table.lookup("A"), Some(CommandKind::Echo));
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = DispatchTable::standard();
        assert_eq!(table.lookup("m105"), None);
        assert_eq!(table.lookup("M1"), None);
        assert_eq!(table.lookup("G1"), None);
        assert_eq!(table.lookup(""), None);
    }

    #[test]
    fn test_register_replaces() {
        let mut table = DispatchTable::new();
        assert_eq!(table.len(), 0);
        assert_eq!(table.register("M105", CommandKind::Echo), None);
        assert_eq!(
            table.register("M105", CommandKind::ReportTemperature),
            Some(CommandKind::Echo)
        );
        assert_eq!(table.len(), 1);
    }
}
