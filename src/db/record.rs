use std::fmt;

/// One result row: lower-cased column names in select order, NULL as "".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn from_columns<I, N>(columns: I) -> Self
    where
        I: IntoIterator<Item = (N, Option<String>)>,
        N: AsRef<str>,
    {
        Self {
            fields: columns
                .into_iter()
                .map(|(name, value)| (name.as_ref().to_lowercase(), value.unwrap_or_default()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        let column = column.to_lowercase();
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
