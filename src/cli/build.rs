use clap::Parser;

/// Arguments shared by the per-kind build commands
#[derive(Parser, Debug, Clone, Default)]
pub struct UnitArgs {
    /// Only build the unit with this manifest name (`*` for every unit)
    pub name: Option<String>,

    /// Template to render (`*` for every template of the unit)
    pub template: Option<String>,
}

impl UnitArgs {
    /// The name filter, with `*` meaning none
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| *name != "*")
    }
}

/// Arguments for the `all` command
#[derive(Parser, Debug, Clone, Default)]
pub struct AllArgs {
    /// Template to render for every unit (`*` for every template)
    pub template: Option<String>,
}
