//! The resolver: decides, per symbol, whether to skip, fit, unfit or substitute.

use crate::catalog::{Discovery, discover};
use crate::report::{Action, Outcome, Report};
use crate::{DonorIndex, Keyword, Property, ResolveConfig, ResolveError, Symbol};

/// Per-symbol decision engine over a prebuilt donor index.
///
/// The donor index is only read, so each symbol's decision depends on nothing
/// but its own properties, the index and the policy.
pub struct Resolver<'a> {
    config: &'a ResolveConfig,
    donors: &'a DonorIndex,
    variant_token: String,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ResolveConfig, donors: &'a DonorIndex) -> Self {
        Self {
            config,
            donors,
            variant_token: config.variant_token(),
        }
    }

    /// Resolve one symbol in place. On error the symbol is left untouched.
    pub fn resolve_symbol(&self, index: usize, symbol: &mut Symbol) -> Outcome {
        let policy = &self.config.policy;
        let reference = symbol
            .find_property(&policy.reference_token)
            .map(|p| p.value.clone());
        let result = self.decide(symbol);
        Outcome {
            index,
            reference,
            result,
        }
    }

    fn decide(&self, symbol: &mut Symbol) -> Result<Action, ResolveError> {
        let policy = &self.config.policy;

        let Some(variant) = symbol.find_property(&self.variant_token) else {
            return Ok(Action::NotApplicable);
        };
        if variant.value.is_empty() {
            return Ok(Action::NoOverride);
        }
        let variant_value = variant.value.clone();

        if symbol.find_property(&policy.reference_token).is_none() {
            return Err(ResolveError::MissingReferenceProperty {
                token: policy.reference_token.clone(),
            });
        }
        let Some(value) = symbol.find_property(&policy.value_token) else {
            return Err(ResolveError::MissingValueProperty {
                token: policy.value_token.clone(),
            });
        };
        let current_value = value.value.clone();

        if variant_value == current_value {
            symbol.fit();
            return Ok(Action::Fitted {
                value: current_value,
            });
        }

        match policy.classify(&variant_value) {
            Some(Keyword::DoNotFit) => {
                symbol.unfit();
                return Ok(Action::DoNotFit {
                    keyword: variant_value,
                });
            }
            // TODO: confirm whether a short/link should stay fitted as a jumper.
            Some(Keyword::Short) => {
                symbol.unfit();
                return Ok(Action::Shorted {
                    keyword: variant_value,
                });
            }
            None => {}
        }

        let Some(donor) = self.donors.get(&variant_value) else {
            return Err(ResolveError::DonorValueNotFound {
                value: variant_value,
            });
        };

        symbol.properties = splice_properties(donor, &symbol.properties, |key| {
            policy.is_variant_key(key)
        });
        symbol.fit();
        Ok(Action::Substituted {
            from: current_value,
            to: variant_value,
        })
    }
}

/// Donor's non-variant properties (donor order), then the symbol's own variant
/// properties (own order).
pub fn splice_properties(
    donor: &[Property],
    own: &[Property],
    is_variant_key: impl Fn(&str) -> bool,
) -> Vec<Property> {
    donor
        .iter()
        .filter(|p| !is_variant_key(&p.key))
        .chain(own.iter().filter(|p| is_variant_key(&p.key)))
        .cloned()
        .collect()
}

/// Run all three passes over `symbols`: discovery, donor indexing, resolution.
///
/// Symbols are mutated in place; the returned report says whether the result
/// may be persisted.
pub fn resolve(symbols: &mut [Symbol], config: &ResolveConfig) -> Report {
    let discovery = discover(symbols, &config.policy);
    resolve_with(symbols, config, &discovery)
}

/// Like [`resolve`], reusing a discovery pass the caller already ran
/// (e.g. to present the catalog before a variant was chosen).
pub fn resolve_with(
    symbols: &mut [Symbol],
    config: &ResolveConfig,
    discovery: &Discovery,
) -> Report {
    let donors = DonorIndex::build(symbols, discovery, &config.policy);
    let resolver = Resolver::new(config, &donors);

    log::debug!(
        "Resolving variant {} over {} symbol(s)",
        config.variant,
        symbols.len()
    );

    let mut report = Report::new(config.variant.clone());
    for (index, symbol) in symbols.iter_mut().enumerate() {
        report.push(resolver.resolve_symbol(index, symbol));
    }
    report
}
