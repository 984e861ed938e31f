//! Synthetic market figures
//!
//! There is no live data source; values jitter uniformly around fixed bases.

use financeai_core::{IndexQuote, MarketIndices, StockMover};
use rand::Rng;

/// Base value and full width of the jitter window
#[derive(Clone, Copy)]
struct Jittered {
    base: f64,
    spread: f64,
}

const fn jittered(base: f64, spread: f64) -> Jittered {
    Jittered { base, spread }
}

impl Jittered {
    fn sample(self, rng: &mut impl Rng) -> f64 {
        self.base + (rng.gen::<f64>() - 0.5) * self.spread
    }
}

struct QuoteSpec {
    value: Jittered,
    change: Jittered,
    change_percent: Jittered,
}

impl QuoteSpec {
    fn sample(&self, rng: &mut impl Rng) -> IndexQuote {
        IndexQuote {
            value: self.value.sample(rng),
            change: self.change.sample(rng),
            change_percent: self.change_percent.sample(rng),
        }
    }
}

const NIFTY: QuoteSpec = QuoteSpec {
    value: jittered(19745.25, 100.0),
    change: jittered(125.30, 50.0),
    change_percent: jittered(0.64, 0.5),
};

const SENSEX: QuoteSpec = QuoteSpec {
    value: jittered(66382.10, 500.0),
    change: jittered(421.85, 200.0),
    change_percent: jittered(0.64, 0.5),
};

const BANK_NIFTY: QuoteSpec = QuoteSpec {
    value: jittered(45234.75, 300.0),
    change: jittered(-78.25, 100.0),
    change_percent: jittered(-0.17, 0.3),
};

struct MoverSpec {
    symbol: &'static str,
    name: &'static str,
    quote: QuoteSpec,
}

const TOP_GAINERS: [MoverSpec; 3] = [
    MoverSpec {
        symbol: "TATAMOTORS",
        name: "Tata Motors Ltd.",
        quote: QuoteSpec {
            value: jittered(785.40, 50.0),
            change: jittered(47.20, 20.0),
            change_percent: jittered(6.39, 2.0),
        },
    },
    MoverSpec {
        symbol: "ADANIGREEN",
        name: "Adani Green Energy",
        quote: QuoteSpec {
            value: jittered(1234.60, 100.0),
            change: jittered(65.80, 30.0),
            change_percent: jittered(5.63, 2.0),
        },
    },
    MoverSpec {
        symbol: "BHARTIARTL",
        name: "Bharti Airtel Ltd.",
        quote: QuoteSpec {
            value: jittered(987.30, 50.0),
            change: jittered(42.15, 20.0),
            change_percent: jittered(4.46, 1.0),
        },
    },
];

pub fn indices() -> MarketIndices {
    let mut rng = rand::thread_rng();
    MarketIndices {
        nifty: NIFTY.sample(&mut rng),
        sensex: SENSEX.sample(&mut rng),
        bank_nifty: BANK_NIFTY.sample(&mut rng),
    }
}

pub fn top_gainers() -> Vec<StockMover> {
    let mut rng = rand::thread_rng();
    TOP_GAINERS
        .iter()
        .map(|spec| {
            let quote = spec.quote.sample(&mut rng);
            StockMover {
                symbol: spec.symbol.to_string(),
                name: spec.name.to_string(),
                price: quote.value,
                change: quote.change,
                change_percent: quote.change_percent,
            }
        })
        .collect()
}
