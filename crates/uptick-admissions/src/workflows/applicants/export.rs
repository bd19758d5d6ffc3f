use super::domain::ApplicantSummary;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write applicant csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finalize applicant csv: {0}")]
    Buffer(String),
}

const HEADER: [&str; 7] = [
    "id",
    "name",
    "email",
    "phone",
    "status",
    "applied_date",
    "course",
];

/// Render the management table as a CSV download.
pub fn write_applicants_csv(rows: &[ApplicantSummary]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for row in rows {
        let applied_date = row.applied_date.format("%Y-%m-%d").to_string();
        writer.write_record([
            row.id.0.as_str(),
            row.name.as_str(),
            row.email.as_str(),
            row.phone.as_str(),
            row.status.label(),
            applied_date.as_str(),
            row.course.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Buffer(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Buffer(err.to_string()))
}
