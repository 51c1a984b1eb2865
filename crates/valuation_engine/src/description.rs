//! Plain-text model explanation, rendered from an engine configuration.

use std::fmt::Write;

use crate::pricing::EngineConfig;
use crate::weights::Bound;

const INTRO: &str = "\
This valuation model prices a company from both EBIT (Earnings Before Interest
and Taxes) and Revenue, using weights that depend on EBIT as a percentage of
Revenue. The weighted price is multiplied by a scaling factor calibrated on
historical deals, so the model reproduces the prices agreed for them.";

const SCALING: &str = "\
Each historical deal is priced with the naive estimate 0.3 x EBIT + 0.7 x Revenue.
The scaling factor is the mean ratio of the agreed price to that estimate, and
is applied uniformly to every price the model produces.";

/// Describe the weighting buckets, constraints and calibration of `config`.
pub fn model_description(config: &EngineConfig) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "## Model Explanation\n\n{}\n", INTRO);

    let _ = writeln!(out, "## Weighting\n");
    for rule in config.schedule.rules() {
        let _ = writeln!(
            out,
            "- EBIT {} of Revenue: EBIT {:.0}%, Revenue {:.0}%",
            describe_bound(&rule.bound),
            rule.weights.ebit_weight * 100.0,
            rule.weights.revenue_weight * 100.0
        );
    }
    let default = config.schedule.default_weights();
    let _ = writeln!(
        out,
        "- Otherwise: EBIT {:.0}%, Revenue {:.0}%\n",
        default.ebit_weight * 100.0,
        default.revenue_weight * 100.0
    );

    let constraints = &config.constraints;
    if !constraints.is_empty() {
        let _ = writeln!(out, "## Price Constraints\n");
        if let Some(ceiling) = constraints.ceiling {
            let _ = writeln!(out, "- The price is capped at {:.0}.", ceiling);
        }
        if let Some(protected) = constraints.protected_floor {
            let _ = writeln!(
                out,
                "- The price does not fall below {:.0} while EBIT and Revenue stay within \
                 {:.0}% of {:.0} and {:.0}.",
                protected.price,
                protected.tolerance * 100.0,
                protected.min_ebit,
                protected.min_revenue
            );
        }
        if let Some(floor) = constraints.floor {
            let _ = writeln!(out, "- The price never falls below {:.0}.", floor);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Scaling Factor Calculation\n\n{}", SCALING);
    out
}

fn describe_bound(bound: &Bound) -> String {
    match *bound {
        Bound::Below(t) => format!("less than {}%", t),
        Bound::AtMost(t) => format!("at most {}%", t),
        Bound::Above(t) => format!("above {}%", t),
        Bound::AtLeast(t) => format!("at least {}%", t),
    }
}
