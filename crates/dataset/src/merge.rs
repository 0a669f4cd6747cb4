use std::collections::HashMap;

use corpfinder_core::CompanyRecord;
use corpfinder_signals::normalize;

use crate::csv_io::{list_field, RawNameRow, RawScrapedRow};

/// Left-join scraped rows onto the names table by lowercased/trimmed domain,
/// producing one `CompanyRecord` per scraped row with `company_id` set to
/// the row's ordinal.
pub fn merge(scraped: Vec<RawScrapedRow>, names: Vec<RawNameRow>) -> Vec<CompanyRecord> {
    let names_by_domain: HashMap<String, RawNameRow> = names
        .into_iter()
        .map(|n| (n.domain.to_lowercase().trim().to_string(), n))
        .collect();

    scraped
        .into_iter()
        .enumerate()
        .map(|(ordinal, row)| build_record(ordinal, row, &names_by_domain))
        .collect()
}

fn build_record(
    ordinal: usize,
    row: RawScrapedRow,
    names_by_domain: &HashMap<String, RawNameRow>,
) -> CompanyRecord {
    let domain = row.domain.to_lowercase().trim().to_string();
    let name_row = names_by_domain.get(&domain);

    let commercial = name_row
        .map(|n| n.company_commercial_name.trim().to_string())
        .filter(|s| !s.is_empty());
    let legal = name_row
        .map(|n| n.company_legal_name.trim().to_string())
        .filter(|s| !s.is_empty());
    let all_names = name_row
        .map(|n| n.company_all_available_names.trim().to_string())
        .filter(|s| !s.is_empty());

    // A missing commercial name means the row has no trustworthy naming data
    // at all, so the legal name is reset to the domain too rather than kept
    // if it happened to be supplied on its own.
    let company_commercial_name = commercial.clone().unwrap_or_else(|| domain.clone());
    let company_legal_name = match commercial {
        Some(_) => legal.unwrap_or_else(|| company_commercial_name.clone()),
        None => company_commercial_name.clone(),
    };
    let company_all_names = all_names.unwrap_or_else(|| company_commercial_name.clone());

    let phones = list_field(&row.phones);
    let phones_normalized = phones.iter().filter_map(|p| normalize::phone(p)).collect();

    let facebook_links = list_field(&row.facebook_links);
    let facebook_links_normalized = facebook_links
        .iter()
        .filter_map(|f| normalize::facebook(f))
        .collect();

    CompanyRecord {
        company_id: ordinal.to_string(),
        website: row.website,
        domain,
        company_commercial_name,
        company_legal_name,
        company_all_names,
        phones,
        phones_normalized,
        addresses: list_field(&row.addresses),
        facebook_links,
        facebook_links_normalized,
        twitter_links: list_field(&row.twitter_links),
        instagram_links: list_field(&row.instagram_links),
        linkedin_links: list_field(&row.linkedin_links),
        youtube_links: list_field(&row.youtube_links),
        status: if row.status.is_empty() {
            "unknown".to_string()
        } else {
            row.status
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraped(domain: &str, status: &str) -> RawScrapedRow {
        RawScrapedRow {
            website: format!("http://{domain}"),
            domain: domain.to_string(),
            status: status.to_string(),
            phones: "['+14155550123']".to_string(),
            addresses: "[]".to_string(),
            facebook_links: "['facebook.com/acme']".to_string(),
            twitter_links: "[]".to_string(),
            instagram_links: "[]".to_string(),
            linkedin_links: "[]".to_string(),
            youtube_links: "[]".to_string(),
        }
    }

    #[test]
    fn missing_name_falls_back_to_domain() {
        let records = merge(vec![scraped("acme.com", "success")], vec![]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_commercial_name, "acme.com");
        assert_eq!(records[0].company_legal_name, "acme.com");
        assert_eq!(records[0].company_id, "0");
    }

    #[test]
    fn present_name_joins_and_legal_defaults_to_commercial() {
        let names = vec![RawNameRow {
            domain: "ACME.com ".to_string(),
            company_commercial_name: "Acme Inc".to_string(),
            company_legal_name: "".to_string(),
            company_all_available_names: "".to_string(),
        }];
        let records = merge(vec![scraped("acme.com", "success")], names);
        assert_eq!(records[0].company_commercial_name, "Acme Inc");
        assert_eq!(records[0].company_legal_name, "Acme Inc");
    }

    #[test]
    fn missing_commercial_name_resets_legal_name_to_domain_too() {
        let names = vec![RawNameRow {
            domain: "acme.com".to_string(),
            company_commercial_name: "".to_string(),
            company_legal_name: "Acme Legal LLC".to_string(),
            company_all_available_names: "".to_string(),
        }];
        let records = merge(vec![scraped("acme.com", "success")], names);
        assert_eq!(records[0].company_commercial_name, "acme.com");
        assert_eq!(records[0].company_legal_name, "acme.com");
    }

    #[test]
    fn normalizes_phones_and_facebook() {
        let records = merge(vec![scraped("acme.com", "success")], vec![]);
        assert_eq!(records[0].phones_normalized, vec!["4155550123".to_string()]);
        assert_eq!(records[0].facebook_links_normalized, vec!["acme".to_string()]);
    }
}
