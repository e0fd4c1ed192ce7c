use crate::help::HelpRegistry;

macro_rules! list {
    ($($pub:vis $module:ident$(: {$($cmd:ident),+})?),+) => {
        $(
            $pub mod $module;
            use $module::$module;

            $(
                $(
                    use $module::$cmd;
                )+
            )?
        )+

        pub fn list() -> Vec<crate::utils::poise::Command> {
            vec![
                $(
                    $module(),
                    $($($cmd(),)+)?
                )+
            ]
        }

        /// Help metadata for every command in [`list`].
        pub fn help_registry() -> HelpRegistry {
            let mut registry = HelpRegistry::new();

            $(
                let entry = $module::help_entry();
                tracing::trace!(command = entry.name(), "registering help");
                registry.register(entry);
            )+

            registry
        }
    };
}

list! {
    gh: {gh_message},
    help
}

pub trait LogCommands {
    async fn log_command(&self);
}

impl LogCommands for crate::utils::Context<'_> {
    async fn log_command(&self) {
        let channel = self
            .channel_id()
            .name(self.serenity_context())
            .await
            .map_or("dms".to_string(), |c| format!("#{c}"));
        tracing::info!(
            "@{} ({}): {}",
            self.author().name,
            channel,
            self.invocation_string()
        );
    }
}
