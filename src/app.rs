use tracing::info;

use animal_gallery::catalog::{AnimalDetail, Category};
use animal_gallery::config::Config;
use animal_gallery::context::GalleryContext;
use animal_gallery::controller::{DetailController, FavoritesBrowser};

use crate::cli::{Commands, FavoritesArgs, ShowArgs, ToggleArgs};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub async fn run(command: Commands, config: Config) -> Result<(), AnyError> {
    match command {
        Commands::Animals => {
            for category in Category::ALL {
                println!("{}", category);
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Show(args) => show(GalleryContext::from_config(&config)?, args).await,
        Commands::Toggle(args) => toggle(GalleryContext::from_config(&config)?, args).await,
        Commands::Favorites(args) => favorites(GalleryContext::from_config(&config)?, args).await,
        Commands::Categories => categories(GalleryContext::from_config(&config)?).await,
    }
}

async fn show(ctx: GalleryContext, args: ShowArgs) -> Result<(), AnyError> {
    let controller = DetailController::new(ctx.clone(), args.category).await;
    controller.load_detail(args.category).await;

    for _ in 1..args.pages {
        controller.fetch_next_page().await;
    }

    let state = controller.snapshot();
    if let Some(error) = &state.last_error {
        eprintln!("warning: {}", error);
    }
    if let Some(detail) = &state.detail {
        print_detail(args.category, detail);
    }

    for url in &state.images {
        let marker = if state.is_favorite(url) { "*" } else { " " };
        println!("{} {}", marker, url);
    }

    info!(
        category = %args.category,
        images = state.images.len(),
        next_page = state.cursor.current_page,
        has_more = state.cursor.has_more_pages,
        metrics = ?ctx.metrics.snapshot(),
        "Show finished"
    );
    Ok(())
}

fn print_detail(category: Category, detail: &AnimalDetail) {
    println!("{}", detail.name.as_deref().unwrap_or(category.label()));
    let fields = [
        ("Scientific name", detail.scientific_name()),
        ("Habitat", detail.habitat()),
        ("Lifespan", detail.lifespan()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {}: {}", label, value);
        }
    }
    if let Some(locations) = detail.locations.as_ref().filter(|l| !l.is_empty()) {
        println!("  Locations: {}", locations.join(", "));
    }
    println!();
}

async fn toggle(ctx: GalleryContext, args: ToggleArgs) -> Result<(), AnyError> {
    let controller = DetailController::new(ctx.clone(), args.category).await;
    let favorite = controller.toggle_favorite(&args.url).await;
    ctx.favorites.flush().await?;

    if let Some(error) = controller.snapshot().last_error {
        return Err(error.into());
    }

    let status = if favorite { "added to" } else { "removed from" };
    println!("{} {} favorites", args.url, status);
    Ok(())
}

async fn favorites(ctx: GalleryContext, args: FavoritesArgs) -> Result<(), AnyError> {
    let browser = FavoritesBrowser::new(ctx);
    browser.filter_favorites(args.animal.as_deref()).await;

    for _ in 1..args.pages {
        browser.fetch_next_page().await;
    }

    let state = browser.snapshot();
    if let Some(error) = state.last_error {
        return Err(error.into());
    }

    for record in &state.page_items {
        println!("{:<10} {}", record.animal_name, record.url);
    }
    if state.has_more_pages {
        println!("... more on page {}", state.current_page + 1);
    }
    Ok(())
}

async fn categories(ctx: GalleryContext) -> Result<(), AnyError> {
    let browser = FavoritesBrowser::new(ctx);
    browser.load_categories().await;

    let state = browser.snapshot();
    if let Some(error) = state.last_error {
        return Err(error.into());
    }

    for name in &state.categories {
        println!("{}", name);
    }
    Ok(())
}
