use std::fmt;

/// An nbextension named by its `module/entry` require path, e.g. `toc2/main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensionId(&'static str);

impl ExtensionId {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Enabled in this order on every install.
pub const DEFAULT_EXTENSIONS: [ExtensionId; 5] = [
    ExtensionId::new("toc2/main"),
    ExtensionId::new("collapsible_headings/main"),
    ExtensionId::new("hide_input_all/main"),
    ExtensionId::new("init_cell/main"),
    ExtensionId::new("codefolding/main"),
];
