//! HISTORY command - show, clear or delete past computations

use calc_plugin::prelude::*;

pub struct History;

static HISTORY_USAGE: [UsageLine; 3] = [
    UsageLine::new("history show", "Display command history"),
    UsageLine::new("history delete <n>", "Delete the n-th entry from history"),
    UsageLine::new("history clear", "Clear the command history"),
];

impl CommandPlugin for History {
    fn meta(&self) -> CommandMeta {
        CommandMeta {
            name: "history",
            description: "Show, clear or delete entries of the computation history",
            usage: &HISTORY_USAGE,
        }
    }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<(), CalcError> {
        match args {
            [] => ctx.say("Usage: history [show|clear|delete <index>]"),
            ["show", ..] => match ctx.history.render() {
                Some(table) => ctx.say(table),
                None => ctx.say("No command history found."),
            },
            ["clear", ..] => {
                ctx.history.clear()?;
                ctx.say("History cleared.")
            }
            ["delete", index, ..] => match index.parse::<usize>() {
                Ok(index) => {
                    ctx.history.delete_at(index)?;
                    ctx.say(format!("Deleted history entry at index {}.", index))
                }
                Err(_) => ctx.say("Invalid index. Usage: history delete <index>"),
            },
            ["delete"] => ctx.say("Invalid index. Usage: history delete <index>"),
            _ => ctx.say("Unknown history command."),
        }
    }
}
