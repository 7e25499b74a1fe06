use chrono::Utc;
use std::io::Write;

use crate::models::{Lead, Result};

const CSV_HEADER: &str = "id,full_name,company_name,role,industry,website,email,linkedin_url,\
country,status,enrichment_data,email_content_a,email_content_b,linkedin_content_a,\
linkedin_content_b,last_updated";

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders all leads as CSV, newest first, header included. Shared between
/// the HTTP export route and the CLI export command.
pub fn render_csv(leads: &[Lead]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for lead in leads {
        let row = [
            lead.id.to_string(),
            csv_field(&lead.full_name),
            csv_field(&lead.company_name),
            csv_field(&lead.role),
            csv_field(&lead.industry),
            csv_field(&lead.website),
            csv_field(&lead.email),
            csv_field(&lead.linkedin_url),
            csv_field(&lead.country),
            lead.status.to_string(),
            csv_field(lead.enrichment_data.as_deref().unwrap_or("")),
            csv_field(lead.email_content_a.as_deref().unwrap_or("")),
            csv_field(lead.email_content_b.as_deref().unwrap_or("")),
            csv_field(lead.linkedin_content_a.as_deref().unwrap_or("")),
            csv_field(lead.linkedin_content_b.as_deref().unwrap_or("")),
            lead.last_updated.to_rfc3339(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

pub fn generate_filename() -> String {
    format!("out/leads_export_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"))
}

pub fn write_csv_file(leads: &[Lead], filename: &str) -> Result<()> {
    if let Some(parent) = std::path::Path::new(filename).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::fs::File::create(filename)?;
    file.write_all(render_csv(leads).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use chrono::Utc;

    fn lead(id: i64, company: &str) -> Lead {
        Lead {
            id,
            full_name: "Ada Byron".to_string(),
            company_name: company.to_string(),
            role: "CTO".to_string(),
            industry: "SaaS".to_string(),
            website: "https://www.example.com".to_string(),
            email: format!("ada.byron{}@example.com", id),
            linkedin_url: "https://linkedin.com/in/ada-byron-101".to_string(),
            country: "United Kingdom".to_string(),
            status: LeadStatus::New,
            enrichment_data: None,
            email_content_a: None,
            email_content_b: None,
            linkedin_content_a: None,
            linkedin_content_b: None,
            logs: String::new(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_lead() {
        let leads = vec![lead(1, "Nimbus Labs"), lead(2, "Vertex Group")];
        let csv = render_csv(&leads);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,full_name,company_name"));
        assert!(lines[1].contains("ada.byron1@example.com"));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let leads = vec![lead(1, "Acme, Inc.")];
        let csv = render_csv(&leads);
        assert!(csv.contains("\"Acme, Inc.\""));
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
