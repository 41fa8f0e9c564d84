use rust_decimal::{Decimal, RoundingStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakesGroup {
    Currency,
    Fun,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakesOption {
    pub id: &'static str,
    pub label: &'static str,
    pub symbol: &'static str,
    pub group: StakesGroup,
}

const fn option(
    id: &'static str,
    label: &'static str,
    symbol: &'static str,
    group: StakesGroup,
) -> StakesOption {
    StakesOption {
        id,
        label,
        symbol,
        group,
    }
}

pub const STAKES_OPTIONS: &[StakesOption] = &[
    option("usd", "USD ($)", "$", StakesGroup::Currency),
    option("eur", "EUR (€)", "€", StakesGroup::Currency),
    option("gbp", "GBP (£)", "£", StakesGroup::Currency),
    option("cad", "CAD ($)", "$", StakesGroup::Currency),
    option("aud", "AUD ($)", "$", StakesGroup::Currency),
    option("jpy", "JPY (¥)", "¥", StakesGroup::Currency),
    option("chf", "CHF (Fr)", "Fr", StakesGroup::Currency),
    option("cny", "CNY (¥)", "¥", StakesGroup::Currency),
    option("cookies", "Cookies", "cookies", StakesGroup::Fun),
    option("hugs", "Hugs", "hugs", StakesGroup::Fun),
    option("i-was-wrong", "I was wrong", "i-was-wrong", StakesGroup::Fun),
    option("other", "Other", "other", StakesGroup::Other),
];

pub fn find_stakes(id: &str) -> Option<&'static StakesOption> {
    STAKES_OPTIONS.iter().find(|o| o.id == id)
}

/// Display symbol for a stakes id; unknown ids are their own symbol.
pub fn stakes_symbol(id: &str) -> &str {
    find_stakes(id).map(|o| o.symbol).unwrap_or(id)
}

/// `$10.80` / `-$13.20` for currencies, `10.80 cookies` for everything else.
pub fn format_amount(amount: Decimal, stakes_id: &str) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let magnitude = format!("{:.2}", cents.abs());
    let sign = if cents.is_sign_negative() && !cents.is_zero() {
        "-"
    } else {
        ""
    };

    match find_stakes(stakes_id) {
        Some(o) if o.group == StakesGroup::Currency => format!("{sign}{}{magnitude}", o.symbol),
        _ => format!("{sign}{magnitude} {}", stakes_symbol(stakes_id)),
    }
}
