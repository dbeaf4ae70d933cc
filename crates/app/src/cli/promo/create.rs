use brewline::promotions::DiscountKind;
use brewline_app::domain::promotions::{
    PromotionsService, SqlitePromotionsService,
    models::{NewPromoCode, PromoCodeUuid},
};
use clap::Args;
use jiff::Timestamp;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct CreatePromoCodeArgs {
    /// Code customers type at checkout (case-sensitive)
    #[arg(long)]
    code: String,

    #[arg(long, default_value = "")]
    description: String,

    /// percentage or fixed
    #[arg(long)]
    kind: DiscountKind,

    /// Percent off for percentage codes, amount off for fixed codes
    #[arg(long)]
    value: Decimal,

    #[arg(long)]
    min_order_amount: Option<Decimal>,

    /// Cap on the discount of a percentage code
    #[arg(long)]
    max_discount: Option<Decimal>,

    /// Start of the validity window (RFC 3339)
    #[arg(long)]
    valid_from: Option<Timestamp>,

    /// End of the validity window (RFC 3339)
    #[arg(long)]
    valid_until: Option<Timestamp>,

    /// Total uses allowed; unlimited when omitted
    #[arg(long)]
    usage_limit: Option<u32>,

    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreatePromoCodeArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let promo = SqlitePromotionsService::new(db)
        .create_promo_code(NewPromoCode {
            uuid: PromoCodeUuid::new(),
            code: args.code,
            description: args.description,
            kind: args.kind,
            value: args.value,
            min_order_amount: args.min_order_amount,
            max_discount: args.max_discount,
            valid_from: args.valid_from,
            valid_until: args.valid_until,
            usage_limit: args.usage_limit,
            active: true,
        })
        .await
        .map_err(|error| format!("failed to create promo code: {error}"))?;

    println!("promo_code_uuid: {}", promo.uuid);
    println!("promo_code: {}", promo.rules.code);

    Ok(())
}
