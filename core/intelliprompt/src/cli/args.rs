use crate::domain::{IpCommand, ListFilter, RefineSource, SaveAs, SortOrder};
use clap::builder::ArgAction;
use clap::error::ErrorKind;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{Category, ModelName, PromptId, ProviderName};
use common::error::Error;
use std::path::PathBuf;

const BIN_NAME: &str = "intelliprompt";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// --no-interactive: 確認プロンプトを出さない（削除は常にキャンセル）
    pub non_interactive: bool,
    /// -y / --yes: 確認プロンプトを常に承認する
    pub assume_yes: bool,
    /// -v / --verbose: ログを stderr にも出す
    pub verbose: bool,
    /// --ephemeral: ストレージをメモリ上に置き、終了時に捨てる
    pub ephemeral: bool,
    pub provider: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub command: IpCommand,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            non_interactive: false,
            assume_yes: false,
            verbose: false,
            ephemeral: false,
            provider: None,
            model: None,
            command: IpCommand::Dashboard,
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成 / ヘルプ・バージョン表示
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
    /// --help など。clap が整形した文字列をそのまま表示して終了する
    Help(String),
}

fn id_arg() -> clap::Arg {
    clap::Arg::new("id")
        .index(1)
        .required(true)
        .value_name("id")
        .help("Prompt id (see `intelliprompt list`)")
}

fn category_arg(required: bool) -> clap::Arg {
    clap::Arg::new("category")
        .short('c')
        .long("category")
        .value_name("category")
        .help("Category label or slug (e.g. marketing, social-media, data-analysis)")
        .required(required)
        .num_args(1)
}

fn context_file_arg() -> clap::Arg {
    clap::Arg::new("context-file")
        .short('f')
        .long("context-file")
        .value_name("path")
        .help("Text file whose content is sent as context")
        .value_parser(value_parser!(PathBuf))
        .num_args(1)
}

fn save_as_arg() -> clap::Arg {
    clap::Arg::new("save-as")
        .short('s')
        .long("save-as")
        .value_name("title")
        .help("Save the result to your library under this title")
        .num_args(1)
}

fn build_clap_command() -> clap::Command {
    clap::Command::new(BIN_NAME)
        .about("Draft, refine and organise AI prompts from the terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            clap::Arg::new("yes")
                .short('y')
                .long("yes")
                .global(true)
                .help("Answer yes to confirmation prompts")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("no-interactive")
                .long("no-interactive")
                .global(true)
                .help("Never prompt (destructive actions are cancelled)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .help("Mirror structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("ephemeral")
                .long("ephemeral")
                .global(true)
                .help("Keep storage in memory for this run only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("provider")
                .short('p')
                .long("provider")
                .global(true)
                .value_name("provider")
                .help("Generation provider (gemini, endpoint, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .global(true)
                .value_name("model")
                .help("Model name (e.g. gemini-2.5-flash)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate-completion")
                .long("generate-completion")
                .value_name("shell")
                .help("Print a shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .subcommand(
            clap::Command::new("list")
                .about("List prompts in your library")
                .arg(
                    clap::Arg::new("favorites")
                        .long("favorites")
                        .help("Only favourites")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("show")
                .about("Print one prompt in full")
                .arg(id_arg())
                .arg(
                    clap::Arg::new("community")
                        .long("community")
                        .help("Look the id up in the community library")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("add")
                .about("Add a prompt to your library")
                .arg(
                    clap::Arg::new("title")
                        .short('t')
                        .long("title")
                        .value_name("title")
                        .required(true)
                        .num_args(1),
                )
                .arg(category_arg(true))
                .arg(
                    clap::Arg::new("description")
                        .short('d')
                        .long("description")
                        .value_name("text")
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("content")
                        .index(1)
                        .value_name("content")
                        .help("Prompt body")
                        .required(true),
                ),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Delete a prompt from your library (asks for confirmation)")
                .arg(id_arg()),
        )
        .subcommand(
            clap::Command::new("favorite")
                .about("Toggle the favourite flag")
                .arg(id_arg()),
        )
        .subcommand(
            clap::Command::new("publish")
                .about("Publish a prompt to the community library")
                .arg(id_arg()),
        )
        .subcommand(
            clap::Command::new("community")
                .about("Browse the community library")
                .arg(
                    clap::Arg::new("search")
                        .short('q')
                        .long("search")
                        .value_name("text")
                        .help("Match title or author")
                        .num_args(1),
                )
                .arg(category_arg(false))
                .arg(
                    clap::Arg::new("sort")
                        .long("sort")
                        .value_name("order")
                        .help("newest, rating or downloads")
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("recommended").about("Top-rated community prompts"),
        )
        .subcommand(
            clap::Command::new("download")
                .about("Write a prompt body to <title>.txt")
                .arg(id_arg())
                .arg(
                    clap::Arg::new("personal")
                        .long("personal")
                        .help("Download from your library instead of the community")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    clap::Arg::new("out-dir")
                        .short('o')
                        .long("out-dir")
                        .value_name("dir")
                        .value_parser(value_parser!(PathBuf))
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("import")
                .about("Import prompts from a JSON export")
                .arg(
                    clap::Arg::new("file")
                        .index(1)
                        .required(true)
                        .value_name("file")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            clap::Command::new("export")
                .about("Export your library as JSON")
                .arg(
                    clap::Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("path")
                        .value_parser(value_parser!(PathBuf))
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("generate")
                .about("Turn an idea into an engineered prompt")
                .arg(
                    clap::Arg::new("template")
                        .short('T')
                        .long("template")
                        .value_name("name")
                        .help("Start from a starter template (see `intelliprompt templates`)")
                        .conflicts_with("idea")
                        .num_args(1),
                )
                .arg(context_file_arg())
                .arg(save_as_arg())
                .arg(category_arg(false))
                .arg(
                    clap::Arg::new("idea")
                        .index(1)
                        .value_name("idea")
                        .help("Idea words; options may come before or after them")
                        .num_args(1..),
                ),
        )
        .subcommand(
            clap::Command::new("refine")
                .about("Revise a prompt with feedback")
                .arg(
                    clap::Arg::new("id")
                        .long("id")
                        .value_name("id")
                        .help("Refine a prompt from your library")
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("current-file")
                        .long("current-file")
                        .value_name("path")
                        .help("Refine the prompt stored in this file")
                        .value_parser(value_parser!(PathBuf))
                        .num_args(1),
                )
                .group(
                    clap::ArgGroup::new("source")
                        .args(["id", "current-file"])
                        .required(true),
                )
                .arg(
                    clap::Arg::new("feedback")
                        .long("feedback")
                        .value_name("text")
                        .required(true)
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("idea")
                        .long("idea")
                        .value_name("text")
                        .help("Original idea, sent along for context")
                        .num_args(1),
                )
                .arg(context_file_arg())
                .arg(save_as_arg())
                .arg(category_arg(false)),
        )
        .subcommand(clap::Command::new("templates").about("List starter templates"))
        .subcommand(clap::Command::new("dashboard").about("Summary of your library"))
        .subcommand(clap::Command::new("credits").about("Remaining free generations"))
        .subcommand(
            clap::Command::new("theme")
                .about("Show or toggle the display theme")
                .arg(
                    clap::Arg::new("toggle")
                        .long("toggle")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn string_arg(m: &clap::ArgMatches, name: &str) -> Option<String> {
    m.get_one::<String>(name).cloned()
}

fn path_arg(m: &clap::ArgMatches, name: &str) -> Option<PathBuf> {
    m.get_one::<PathBuf>(name).cloned()
}

fn id_of(m: &clap::ArgMatches) -> PromptId {
    PromptId::new(string_arg(m, "id").unwrap_or_default())
}

fn category_of(m: &clap::ArgMatches) -> Result<Option<Category>, Error> {
    m.get_one::<String>("category")
        .map(|s| s.parse::<Category>())
        .transpose()
}

fn save_of(m: &clap::ArgMatches) -> Result<Option<SaveAs>, Error> {
    let category = category_of(m)?;
    Ok(string_arg(m, "save-as").map(|title| SaveAs { title, category }))
}

fn subcommand_to_command(name: &str, m: &clap::ArgMatches) -> Result<IpCommand, Error> {
    let cmd = match name {
        "list" => IpCommand::List {
            filter: if m.get_flag("favorites") {
                ListFilter::Favorites
            } else {
                ListFilter::All
            },
        },
        "show" => IpCommand::Show {
            id: id_of(m),
            community: m.get_flag("community"),
        },
        "add" => IpCommand::Add {
            title: string_arg(m, "title").unwrap_or_default(),
            description: string_arg(m, "description").unwrap_or_default(),
            content: string_arg(m, "content").unwrap_or_default(),
            category: category_of(m)?
                .ok_or_else(|| Error::invalid_argument("--category is required"))?,
        },
        "delete" => IpCommand::Delete { id: id_of(m) },
        "favorite" => IpCommand::Favorite { id: id_of(m) },
        "publish" => IpCommand::Publish { id: id_of(m) },
        "community" => IpCommand::Community {
            search: string_arg(m, "search"),
            category: category_of(m)?,
            sort: m
                .get_one::<String>("sort")
                .map(|s| s.parse::<SortOrder>())
                .transpose()?
                .unwrap_or_default(),
        },
        "recommended" => IpCommand::Recommended,
        "download" => IpCommand::Download {
            id: id_of(m),
            personal: m.get_flag("personal"),
            out_dir: path_arg(m, "out-dir"),
        },
        "import" => IpCommand::Import {
            file: path_arg(m, "file").unwrap_or_default(),
        },
        "export" => IpCommand::Export {
            output: path_arg(m, "output"),
        },
        "generate" => {
            let words: Vec<String> = m
                .get_many::<String>("idea")
                .map(|i| i.cloned().collect())
                .unwrap_or_default();
            IpCommand::Generate {
                idea: if words.is_empty() {
                    None
                } else {
                    Some(words.join(" "))
                },
                template: string_arg(m, "template"),
                context_file: path_arg(m, "context-file"),
                save: save_of(m)?,
            }
        }
        "refine" => {
            let source = match (string_arg(m, "id"), path_arg(m, "current-file")) {
                (Some(id), _) => RefineSource::Prompt(PromptId::new(id)),
                (None, Some(path)) => RefineSource::File(path),
                (None, None) => {
                    return Err(Error::invalid_argument(
                        "refine needs --id or --current-file",
                    ))
                }
            };
            IpCommand::Refine {
                source,
                feedback: string_arg(m, "feedback").unwrap_or_default(),
                idea: string_arg(m, "idea"),
                context_file: path_arg(m, "context-file"),
                save: save_of(m)?,
            }
        }
        "templates" => IpCommand::Templates,
        "dashboard" => IpCommand::Dashboard,
        "credits" => IpCommand::Credits,
        "theme" => IpCommand::Theme {
            toggle: m.get_flag("toggle"),
        },
        other => {
            return Err(Error::invalid_argument(format!(
                "Unknown command '{}'",
                other
            )))
        }
    };
    Ok(cmd)
}

fn matches_to_config(matches: &clap::ArgMatches) -> Result<Config, Error> {
    let command = match matches.subcommand() {
        Some((name, sub)) => subcommand_to_command(name, sub)?,
        None => IpCommand::Dashboard,
    };
    Ok(Config {
        non_interactive: matches.get_flag("no-interactive"),
        assume_yes: matches.get_flag("yes"),
        verbose: matches.get_flag("verbose"),
        ephemeral: matches.get_flag("ephemeral"),
        provider: string_arg(matches, "provider").map(ProviderName::new),
        model: string_arg(matches, "model").map(ModelName::new),
        command,
    })
}

fn parse_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = match build_clap_command().try_get_matches_from(args) {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(ParseOutcome::Help(e.to_string()));
        }
        Err(e) => return Err(Error::invalid_argument(e.to_string())),
    };

    if let Some(&shell) = matches.get_one::<Shell>("generate-completion") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)?))
}

/// コマンドラインを解析する
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_from(std::env::args_os())
}

/// テスト用: 引数スライスから Config を解析する
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    match parse_from(args.iter().copied())? {
        ParseOutcome::Config(c) => Ok(c),
        ParseOutcome::GenerateCompletion(_) | ParseOutcome::Help(_) => Err(
            Error::invalid_argument("arguments did not produce a command"),
        ),
    }
}

/// 補完スクリプトを標準出力に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
}
