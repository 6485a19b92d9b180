use super::print::{
    print_categories, print_config, print_full_resource, print_messages, print_resources,
    print_tags, print_videos,
};
use super::setup::{Cli, Commands, TagCommands};
use clap::Parser;
use directories::ProjectDirs;
use sanctuary::api::{ConfigAction, ResourceChanges, SanctuaryApi};
use sanctuary::error::{Result, SanctuaryError};
use sanctuary::filter::{ResourceFilters, TagFilters};
use sanctuary::model::{NewResource, ResourceKind, TagUpdate};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DATA_DIR_ENV: &str = "SANCTUARY_DATA_DIR";
const LOG_ENV: &str = "SANCTUARY_LOG";

struct AppContext {
    api: SanctuaryApi,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { kind, tags, search }) => handle_list(&mut ctx, kind, tags, search),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Add {
            kind,
            title,
            url,
            description,
            tags,
            id,
        }) => {
            let mut draft = NewResource::new(kind, title, url).with_tags(tags);
            draft.description = description;
            draft.id = id;
            handle_add(&mut ctx, draft)
        }
        Some(Commands::Update {
            id,
            kind,
            title,
            url,
            description,
            tags,
            clear_tags,
        }) => {
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };
            let changes = ResourceChanges {
                kind,
                title,
                url,
                description,
                tags,
            };
            handle_update(&mut ctx, &id, changes)
        }
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, ids),
        Some(Commands::Tags { command }) => handle_tags(&mut ctx, command),
        Some(Commands::Videos {
            search,
            tags,
            open,
            import,
        }) => handle_videos(&mut ctx, search, tags, open, import).await,
        Some(Commands::Submit { url, tags }) => handle_submit(&mut ctx, url, tags).await,
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None, Vec::new(), None),
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sanctuary=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("sanctuary=warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    let api = SanctuaryApi::open(data_dir)?;
    Ok(AppContext { api })
}

fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "sanctuary", "sanctuary")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SanctuaryError::Config("Could not determine data directory".into()))
}

fn handle_list(
    ctx: &mut AppContext,
    kind: Option<ResourceKind>,
    tags: Vec<String>,
    search: Option<String>,
) -> Result<()> {
    let filters = ResourceFilters {
        kind,
        tags,
        search: search.unwrap_or_default(),
    };
    let result = ctx.api.list_resources(filters)?;
    print_resources(&result.listed_resources, ctx.api.app().tags().tags());
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.get_resource(id)?;
    for resource in &result.listed_resources {
        print_full_resource(resource, ctx.api.app().tags().tags());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, draft: NewResource) -> Result<()> {
    let result = ctx.api.add_resource(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, id: &str, changes: ResourceChanges) -> Result<()> {
    if changes.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }
    let result = ctx.api.edit_resource(id, changes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<String>) -> Result<()> {
    for id in ids {
        let result = ctx.api.delete_resource(&id)?;
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_tags(ctx: &mut AppContext, command: Option<TagCommands>) -> Result<()> {
    let result = match command {
        None => ctx.api.list_tags(TagFilters::default())?,
        Some(TagCommands::List { category, search }) => ctx.api.list_tags(TagFilters {
            category,
            search: search.unwrap_or_default(),
        })?,
        Some(TagCommands::Add { name, category }) => ctx.api.add_tag(&name, category)?,
        Some(TagCommands::Update {
            tag,
            name,
            category,
            uncategorize,
        }) => {
            let updates = TagUpdate {
                name,
                category: if uncategorize {
                    Some(None)
                } else {
                    category.map(Some)
                },
            };
            ctx.api.update_tag(&tag, updates)?
        }
        Some(TagCommands::Delete { tags }) => {
            for tag in tags {
                let result = ctx.api.delete_tag(&tag)?;
                print_messages(&result.messages);
            }
            return Ok(());
        }
        Some(TagCommands::Categories) => {
            let result = ctx.api.categories();
            print_categories(&result.categories);
            return Ok(());
        }
    };

    if result.affected_tags.is_empty() && result.messages.is_empty() {
        print_tags(&result.listed_tags);
    }
    print_messages(&result.messages);
    Ok(())
}

async fn handle_videos(
    ctx: &mut AppContext,
    search: Option<String>,
    tags: Vec<String>,
    open: Option<String>,
    import: bool,
) -> Result<()> {
    if import {
        let result = ctx.api.import_videos().await?;
        print_messages(&result.messages);
        return Ok(());
    }

    let result = ctx
        .api
        .list_videos(search.unwrap_or_default(), tags)
        .await?;
    match open {
        Some(id) => {
            print_messages(&result.messages);
            let opened = ctx.api.open_video(&id)?;
            print_videos(&opened.listed_videos);
            print_messages(&opened.messages);
        }
        None => {
            print_videos(&result.listed_videos);
            print_messages(&result.messages);
        }
    }
    Ok(())
}

async fn handle_submit(ctx: &mut AppContext, url: String, tags: Vec<String>) -> Result<()> {
    let result = ctx.api.submit_video(url, tags).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
