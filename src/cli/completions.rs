use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Bash:\n    sfmc-build completions bash > ~/.bash_completion.d/sfmc-build\n\n\
                  Zsh:\n    sfmc-build completions zsh > ~/.zfunc/_sfmc-build\n\n\
                  Fish:\n    sfmc-build completions fish > ~/.config/fish/completions/sfmc-build.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
