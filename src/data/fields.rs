/// Ordered list of header names that may carry one logical field.
///
/// Resolved once against a header row into the columns that are actually
/// present; each record then takes the first of those columns with a
/// non-empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAliases {
    pub field: &'static str,
    pub candidates: &'static [&'static str],
}

pub const PARTICIPANT_FIELD: FieldAliases = FieldAliases {
    field: "participant",
    candidates: &["participant", "Participant", "ID", "id"],
};

pub const MEAN_GLUCOSE_FIELD: FieldAliases = FieldAliases {
    field: "mean_glucose",
    candidates: &["mean_glucose"],
};

pub const STD_GLUCOSE_FIELD: FieldAliases = FieldAliases {
    field: "std_glucose",
    candidates: &["std_glucose"],
};

pub const GENDER_FIELD: FieldAliases = FieldAliases {
    field: "gender",
    candidates: &["Gender", "gender"],
};

pub const HBA1C_FIELD: FieldAliases = FieldAliases {
    field: "hba1c",
    candidates: &["HbA1c", "hba1c"],
};

/// Column indices of the aliases present in a header row, in alias order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub field: &'static str,
    columns: Vec<usize>,
}

impl ResolvedField {
    #[must_use]
    pub fn resolve<'h>(aliases: FieldAliases, headers: impl IntoIterator<Item = &'h str>) -> Self {
        let headers: Vec<&str> = headers.into_iter().collect();
        let columns = aliases
            .candidates
            .iter()
            .filter_map(|candidate| headers.iter().position(|header| header.trim() == *candidate))
            .collect();
        Self {
            field: aliases.field,
            columns,
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.columns.is_empty()
    }

    /// First non-empty value among the resolved columns.
    #[must_use]
    pub fn value<'r>(&self, record: &'r csv::StringRecord) -> Option<&'r str> {
        self.columns
            .iter()
            .filter_map(|&column| record.get(column))
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_aliases_in_declared_order() {
        let resolved = ResolvedField::resolve(PARTICIPANT_FIELD, ["id", "mean_glucose", "ID"]);
        let record = csv::StringRecord::from(vec!["7", "101.2", "12"]);
        // `ID` is listed before `id`
        assert_eq!(resolved.value(&record), Some("12"));

        let record = csv::StringRecord::from(vec!["7", "101.2", ""]);
        assert_eq!(resolved.value(&record), Some("7"));
    }

    #[test]
    fn missing_aliases_resolve_to_nothing() {
        let resolved = ResolvedField::resolve(HBA1C_FIELD, ["participant", "mean_glucose"]);
        assert!(!resolved.is_present());
        let record = csv::StringRecord::from(vec!["1", "99"]);
        assert_eq!(resolved.value(&record), None);
    }
}
