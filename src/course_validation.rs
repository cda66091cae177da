use crate::catalog::CatalogError;
use crate::term::Term;

pub fn normalize_label(label: &str) -> Result<String, CatalogError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}

/// Parses raw term tags, dropping repeats while keeping the first occurrence.
pub fn parse_terms<I, S>(label: &str, tags: I) -> Result<Vec<Term>, CatalogError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut terms = Vec::with_capacity(Term::ALL.len());
    for tag in tags {
        let tag = tag.as_ref();
        let term = tag.parse::<Term>().map_err(|_| CatalogError::InvalidTerm {
            label: label.to_string(),
            tag: tag.to_string(),
        })?;
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    validate_terms(label, &terms)?;
    Ok(terms)
}

pub fn validate_terms(label: &str, terms: &[Term]) -> Result<(), CatalogError> {
    if terms.is_empty() {
        return Err(CatalogError::NoEligibleTerms {
            label: label.to_string(),
        });
    }
    Ok(())
}

pub fn validate_credits(label: &str, credits: i64) -> Result<u32, CatalogError> {
    if credits <= 0 {
        return Err(CatalogError::InvalidCredits {
            label: label.to_string(),
            credits,
        });
    }
    u32::try_from(credits).map_err(|_| CatalogError::InvalidCredits {
        label: label.to_string(),
        credits,
    })
}
