//! MENU command - list what the calculator can do

use calc_plugin::prelude::*;

pub struct Menu;

static MENU_USAGE: [UsageLine; 1] = [UsageLine::new("menu", "Show this menu")];

const RULE: &str = "-------------------";

impl CommandPlugin for Menu {
    fn meta(&self) -> CommandMeta {
        CommandMeta {
            name: "menu",
            description: "List available operations and commands",
            usage: &MENU_USAGE,
        }
    }

    fn execute(&self, _args: &[&str], ctx: &mut CommandContext<'_>) -> Result<(), CalcError> {
        let mut lines = vec!["Available Commands:".to_string(), RULE.to_string()];

        for (name, meta) in ctx.registry.operations() {
            let operands: Vec<String> = meta.args.iter().map(|a| format!("<{}>", a.name)).collect();
            lines.push(format!("- {} {} ({})", name, operands.join(" "), meta.description));
        }
        for command in ctx.registry.commands() {
            for usage in command.meta().usage {
                lines.push(format!("- {} ({})", usage.syntax, usage.description));
            }
        }
        lines.push("- exit (Exit the calculator)".to_string());
        lines.push(RULE.to_string());

        for line in lines {
            ctx.say(line)?;
        }
        Ok(())
    }
}
