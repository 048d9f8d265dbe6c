mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::process;

use cli::{parse_args, print_completion, Config, ParseOutcome};
use common::domain::{Prompt, PromptId};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use common::store::{DeleteOutcome, ImportOutcome, FREE_GENERATIONS};
use domain::{IpCommand, RefineSource, SaveAs};
use ports::inbound::UseCaseRunner;
use usecase::generate::{check_save, FileContext};
use usecase::library::{self, EXPORT_FILE_NAME};
use usecase::templates::{find_template, placeholders, starter_templates};
use wiring::{wire_app, App};

/// インポートで 1 件も取り込めなかったときの終了コード
const EXIT_NOTHING_IMPORTED: i32 = 1;

/// IpCommand をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&mut self, config: Config) -> Result<i32, Error> {
        let cmd = config.command;
        let command_name = cmd.name();
        self.log(
            LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("provider", self.app.generator_kind().as_str()),
        );

        let result = self.dispatch(cmd);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        self.log(
            LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        match result {
            Err(e) => {
                self.log(
                    LogRecord::new(LogLevel::Error, e.to_string())
                        .layer("cli")
                        .kind("error"),
                );
                // 通知として表示済みのエラーは二重に出さない
                if self.already_notified(&e) {
                    Ok(e.exit_code())
                } else {
                    Err(e)
                }
            }
            ok => ok,
        }
    }
}

impl Runner {
    fn log(&self, record: LogRecord) {
        let _ = self.app.logger.log(&record);
    }

    fn already_notified(&self, e: &Error) -> bool {
        self.app
            .store
            .notification()
            .map(|n| n.is_error() && n.message == e.to_string())
            .unwrap_or(false)
    }

    fn dispatch(&mut self, cmd: IpCommand) -> Result<i32, Error> {
        match cmd {
            IpCommand::List { filter } => {
                let hits = library::filter_personal(self.app.store.personal(), filter);
                if hits.is_empty() {
                    println!("No prompts.");
                }
                for p in hits {
                    println!("{}", personal_line(p));
                }
                Ok(0)
            }
            IpCommand::Show { id, community } => {
                let prompt = if community {
                    self.app.store.find_community(&id)
                } else {
                    self.app.store.find_personal(&id)
                };
                let prompt = prompt.ok_or_else(|| not_found(&id, !community))?;
                print_prompt(prompt);
                Ok(0)
            }
            IpCommand::Add {
                title,
                description,
                content,
                category,
            } => {
                let id = self.app.store.add_prompt(common::domain::NewPrompt {
                    title,
                    description,
                    content,
                    category,
                });
                println!("{}", id);
                Ok(0)
            }
            IpCommand::Delete { id } => match self.app.store.delete_prompt(&id) {
                DeleteOutcome::Deleted | DeleteOutcome::Cancelled => Ok(0),
                DeleteOutcome::NotFound => Err(not_found(&id, true)),
            },
            IpCommand::Favorite { id } => {
                let now = self
                    .app
                    .store
                    .toggle_favorite(&id)
                    .ok_or_else(|| not_found(&id, true))?;
                println!("{}", if now { "★ favourite" } else { "☆ not a favourite" });
                Ok(0)
            }
            IpCommand::Publish { id } => {
                let already = self
                    .app
                    .store
                    .find_personal(&id)
                    .map(|p| p.is_published)
                    .ok_or_else(|| not_found(&id, true))?;
                if already || !self.app.store.publish_prompt(&id) {
                    println!("Already published.");
                }
                Ok(0)
            }
            IpCommand::Community {
                search,
                category,
                sort,
            } => {
                let hits = library::search_community(
                    self.app.store.community(),
                    search.as_deref(),
                    category,
                    sort,
                );
                if hits.is_empty() {
                    println!("No community prompts match.");
                }
                for p in hits {
                    println!("{}", community_line(p));
                }
                Ok(0)
            }
            IpCommand::Recommended => {
                let hits = library::recommended(self.app.store.community());
                if hits.is_empty() {
                    println!("No rated prompts yet.");
                }
                for p in hits {
                    println!("{}", community_line(p));
                }
                Ok(0)
            }
            IpCommand::Download {
                id,
                personal,
                out_dir,
            } => {
                let dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
                let path = self
                    .app
                    .transfer
                    .download(&mut self.app.store, &id, personal, &dir)?;
                println!("{}", path.display());
                Ok(0)
            }
            IpCommand::Import { file } => {
                match self.app.transfer.import_from(&mut self.app.store, &file)? {
                    ImportOutcome::Imported { .. } => Ok(0),
                    ImportOutcome::NoValidPrompts | ImportOutcome::Failed { .. } => {
                        Ok(EXIT_NOTHING_IMPORTED)
                    }
                }
            }
            IpCommand::Export { output } => {
                let path = output.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
                self.app.transfer.export_to(&mut self.app.store, &path)?;
                println!("{}", path.display());
                Ok(0)
            }
            IpCommand::Generate {
                idea,
                template,
                context_file,
                save,
            } => self.generate(idea, template, context_file, save),
            IpCommand::Refine {
                source,
                feedback,
                idea,
                context_file,
                save,
            } => self.refine(source, feedback, idea, context_file, save),
            IpCommand::Templates => {
                for t in starter_templates() {
                    println!("{} [{}]", t.name, t.category);
                    println!("    {}", t.idea);
                }
                Ok(0)
            }
            IpCommand::Dashboard => {
                self.print_dashboard();
                Ok(0)
            }
            IpCommand::Credits => {
                println!(
                    "{} of {} free generations left",
                    self.app.store.credits(),
                    FREE_GENERATIONS
                );
                Ok(0)
            }
            IpCommand::Theme { toggle } => {
                if toggle {
                    self.app.store.toggle_theme();
                } else {
                    println!("{}", self.app.store.theme());
                }
                Ok(0)
            }
        }
    }

    fn read_context(&mut self, path: Option<PathBuf>) -> Result<Option<FileContext>, Error> {
        path.map(|p| self.app.transfer.read_context(&mut self.app.store, &p))
            .transpose()
    }

    fn generate(
        &mut self,
        idea: Option<String>,
        template: Option<String>,
        context_file: Option<PathBuf>,
        save: Option<SaveAs>,
    ) -> Result<i32, Error> {
        let (idea, template_category) = match template {
            Some(name) => {
                let t = find_template(&name)?;
                let gaps = placeholders(t.idea)?;
                if !gaps.is_empty() {
                    eprintln!("Template placeholders left as-is: [{}]", gaps.join("], ["));
                }
                (t.idea.to_string(), Some(t.category))
            }
            None => (idea.unwrap_or_default(), None),
        };
        // 保存指定の誤りで生成回数を無駄にしないよう、呼び出し前に確かめる
        let save = save
            .map(|save| SaveAs {
                category: save.category.or(template_category),
                ..save
            })
            .map(|save| check_save(&save).map(|_| save))
            .transpose()?;
        let generation = self.app.generation()?;
        let context = self.read_context(context_file)?;
        let text = generation.generate(&mut self.app.store, &idea, context.as_ref())?;
        println!("{}", text);

        if let Some(save) = save {
            let name = context.as_ref().map(|c| c.name.as_str());
            let id = generation.save(&mut self.app.store, &save, &idea, name, &text)?;
            eprintln!("id: {}", id);
        }
        Ok(0)
    }

    fn refine(
        &mut self,
        source: RefineSource,
        feedback: String,
        idea: Option<String>,
        context_file: Option<PathBuf>,
        save: Option<SaveAs>,
    ) -> Result<i32, Error> {
        // ライブラリから改訂する場合は元の category を保存時の既定にする
        let (current, source_category) = match &source {
            RefineSource::Prompt(id) => self
                .app
                .store
                .find_personal(id)
                .map(|p| (p.content.clone(), Some(p.category)))
                .ok_or_else(|| not_found(id, true))?,
            RefineSource::File(path) => (
                self.app
                    .transfer
                    .read_prompt_file(&mut self.app.store, path)?,
                None,
            ),
        };
        let save = save
            .map(|save| SaveAs {
                category: save.category.or(source_category),
                ..save
            })
            .map(|save| check_save(&save).map(|_| save))
            .transpose()?;
        let idea = idea.unwrap_or_default();
        let generation = self.app.generation()?;
        let context = self.read_context(context_file)?;
        let text = generation.refine(
            &mut self.app.store,
            &idea,
            context.as_ref(),
            &current,
            &feedback,
        )?;
        println!("{}", text);

        if let Some(save) = save {
            let name = context.as_ref().map(|c| c.name.as_str());
            let id = generation.save(&mut self.app.store, &save, &idea, name, &text)?;
            eprintln!("id: {}", id);
        }
        Ok(0)
    }

    fn print_dashboard(&self) {
        let store = &self.app.store;
        let summary = library::dashboard(store.personal());
        println!("Prompts in your library: {}", summary.total);
        println!(
            "Free generations left: {} of {}",
            store.credits(),
            FREE_GENERATIONS
        );
        println!("Theme: {}", store.theme());
        if summary.by_category.is_empty() {
            println!("No data to show.");
        } else {
            println!("By category:");
            for (category, n) in &summary.by_category {
                println!("  {:<14} {}", category.label(), n);
            }
        }
        if !summary.favorites.is_empty() {
            println!("Favourites:");
            for p in &summary.favorites {
                println!("  {}", personal_line(p));
            }
        }
    }
}

fn not_found(id: &PromptId, personal: bool) -> Error {
    let library = if personal { "your library" } else { "the community library" };
    Error::invalid_argument(format!("No prompt with id '{}' in {}.", id, library))
}

fn personal_line(p: &Prompt) -> String {
    let mut flags = String::new();
    if p.is_favorite {
        flags.push_str(" ★");
    }
    if p.is_published {
        flags.push_str(" (published)");
    }
    format!("{}  {}  [{}]{}", p.id, p.title, p.category, flags)
}

fn community_line(p: &Prompt) -> String {
    let metrics = match (p.rating, p.downloads) {
        (Some(r), Some(d)) => format!("★ {:.1}  ↓ {}", r, d),
        _ => "not yet rated".to_string(),
    };
    let author = p.author.as_deref().unwrap_or("-");
    format!("{}  {}  [{}]  by {}  {}", p.id, p.title, p.category, author, metrics)
}

fn print_prompt(p: &Prompt) {
    println!("{}", p.title);
    println!("id:        {}", p.id);
    println!("category:  {}", p.category);
    println!("created:   {}", p.created_at.to_rfc3339());
    if let Some(author) = &p.author {
        println!("author:    {}", author);
    }
    if let (Some(r), Some(d)) = (p.rating, p.downloads) {
        println!("rating:    {:.1}", r);
        println!("downloads: {}", d);
    }
    if !p.description.is_empty() {
        println!();
        println!("{}", p.description);
    }
    println!();
    println!("{}", p.content);
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("intelliprompt: {}", e);
            if e.is_usage() {
                eprintln!("Run `intelliprompt --help` for usage.");
            }
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
        ParseOutcome::Help(text) => {
            print!("{}", text);
            return Ok(0);
        }
    };
    let app = wire_app(&config)?;
    let mut runner = Runner { app };
    runner.run(config)
}
