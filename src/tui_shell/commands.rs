use super::CommandDef;

pub(super) fn command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "help",
            aliases: &["h", "?"],
            usage: "help [command]",
            help: "Show help",
        },
        CommandDef {
            name: "go",
            aliases: &["open", "g"],
            usage: "go <bookmark>",
            help: "Navigate to a bookmark (e.g. admin/system/tasks)",
        },
        CommandDef {
            name: "mode",
            aliases: &["m"],
            usage: "mode <browse|admin|user>",
            help: "Switch header mode",
        },
        CommandDef {
            name: "back",
            aliases: &["b"],
            usage: "back",
            help: "Drop the deepest drilldown selection",
        },
        CommandDef {
            name: "refresh",
            aliases: &["r"],
            usage: "refresh",
            help: "Reload permissions and server state",
        },
        CommandDef {
            name: "edit",
            aliases: &[],
            usage: "edit",
            help: "Mark the current view as having unsaved changes",
        },
        CommandDef {
            name: "save",
            aliases: &[],
            usage: "save",
            help: "Clear the unsaved-changes mark",
        },
        CommandDef {
            name: "snippets",
            aliases: &["snip"],
            usage: "snippets",
            help: "List formats with dependency snippets",
        },
        CommandDef {
            name: "time",
            aliases: &[],
            usage: "time",
            help: "Toggle relative/absolute timestamps",
        },
        CommandDef {
            name: "quit",
            aliases: &["q", "exit"],
            usage: "quit",
            help: "Exit",
        },
    ]
}

pub(super) fn find_command(name: &str) -> Option<CommandDef> {
    let name = name.to_ascii_lowercase();
    command_defs()
        .into_iter()
        .find(|c| c.name == name || c.aliases.contains(&name.as_str()))
}
