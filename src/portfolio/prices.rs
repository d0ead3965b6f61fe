use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A tradeable stock and its fixed unit price in USD
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub symbol: String,
    pub company: String,
    pub price: Decimal,
}

impl Listing {
    pub fn new(symbol: &str, company: &str, price: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            company: company.to_string(),
            price,
        }
    }
}

/// Static price table. Built once at startup and never mutated.
///
/// Listings keep their seed order so the "available stocks" view is stable.
#[derive(Debug, Clone)]
pub struct PriceTable {
    listings: Vec<Listing>,
}

impl PriceTable {
    /// The ten stocks the tracker ships with
    pub fn standard() -> Self {
        Self::from_listings(vec![
            Listing::new("AAPL", "Apple", dec!(180.50)),
            Listing::new("TSLA", "Tesla", dec!(250.75)),
            Listing::new("GOOGL", "Google", dec!(140.25)),
            Listing::new("MSFT", "Microsoft", dec!(375.80)),
            Listing::new("AMZN", "Amazon", dec!(145.30)),
            Listing::new("META", "Meta", dec!(325.60)),
            Listing::new("NVDA", "NVIDIA", dec!(450.20)),
            Listing::new("NFLX", "Netflix", dec!(425.40)),
            Listing::new("AMD", "AMD", dec!(105.85)),
            Listing::new("INTC", "Intel", dec!(43.25)),
        ])
    }

    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Unit price for a symbol, if it is listed
    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.get(symbol).map(|l| l.price)
    }

    pub fn get(&self, symbol: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.symbol == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::standard()
    }
}
