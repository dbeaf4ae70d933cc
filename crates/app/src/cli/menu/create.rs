use brewline::catalog::Variant;
use brewline_app::domain::catalog::{
    CatalogService, SqliteCatalogService,
    models::{MenuItemUuid, NewCatalogItem},
};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct CreateMenuItemArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Menu category, e.g. coffee or pastry
    #[arg(long)]
    category: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Price before any size modifier
    #[arg(long)]
    base_price: Decimal,

    /// Size variant as `size=modifier`, repeatable
    #[arg(long = "variant", value_parser = parse_variant)]
    variants: Vec<Variant>,

    /// Create the item switched off
    #[arg(long)]
    unavailable: bool,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

fn parse_variant(value: &str) -> Result<Variant, String> {
    let (size, modifier) = value
        .split_once('=')
        .ok_or_else(|| format!("expected size=modifier, got \"{value}\""))?;

    let modifier: Decimal = modifier
        .trim()
        .parse()
        .map_err(|error| format!("invalid price modifier \"{modifier}\": {error}"))?;

    Ok(Variant::new(size.trim(), modifier))
}

pub(crate) async fn run(args: CreateMenuItemArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let item = SqliteCatalogService::new(db)
        .create_item(NewCatalogItem {
            uuid: MenuItemUuid::new(),
            name: args.name,
            description: args.description,
            category: args.category,
            base_price: args.base_price,
            variants: args.variants.into_iter().collect(),
            available: !args.unavailable,
        })
        .await
        .map_err(|error| format!("failed to create menu item: {error}"))?;

    println!("menu_item_uuid: {}", item.uuid);
    println!("menu_item_name: {}", item.item.name);

    Ok(())
}
