use attend_config::Config;

use crate::cli::args;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, info, section, success, OutputPreferences};
use crate::cli::registry::CommandEntry;

const USAGE: &str = "config [show|timezone <Area/City>|color <on|off>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change CLI preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((key, rest)) = args.split_first() else {
        return show(context);
    };
    match key.to_ascii_lowercase().as_str() {
        "show" => show(context),
        "timezone" | "tz" => {
            let name = args::required(rest, 0, "config timezone <Area/City>")?;
            let timezone = context.update_config(|config| config.set_timezone(name))?;
            context.set_timezone(timezone);
            success(format!("Timezone set to {}.", timezone.name()));
            Ok(())
        }
        "color" | "colour" => {
            let enabled = args::on_off(args::required(rest, 0, "config color <on|off>")?)?;
            context.update_config(|config| {
                config.ui_color_enabled = enabled;
                Ok(())
            })?;
            output::set_preferences(OutputPreferences {
                color_enabled: enabled,
            });
            success(format!("Color output {}.", if enabled { "on" } else { "off" }));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "Unknown config key `{other}`. Usage: {USAGE}"
        ))),
    }
}

fn show(context: &mut ShellContext) -> CommandResult {
    let config: &Config = context.config();
    section("Configuration");
    info(format!("Config file : {}", context.config_path().display()));
    info(format!("Data file   : {}", context.store_path().display()));
    info(format!("Timezone    : {}", config.timezone));
    if config.timezone != context.timezone().name() {
        info(format!("  in effect : {}", context.timezone().name()));
    }
    info(format!(
        "Color       : {}",
        if config.ui_color_enabled { "on" } else { "off" }
    ));
    info(format!("Today       : {}", context.today()));
    Ok(())
}
