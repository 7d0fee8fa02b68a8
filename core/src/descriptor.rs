/// Column layout of an entity type, as declared by its field attributes.
///
/// Entries keep declaration order. A `Group` is an embedded entity whose
/// own columns are spliced into the parent at that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    entity: &'static str,
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Column(&'static str),
    Group(Descriptor),
}

impl Descriptor {
    pub fn new(entity: &'static str) -> Self {
        Descriptor { entity, entries: Vec::new() }
    }

    pub fn column(mut self, name: &'static str) -> Self {
        self.entries.push(Entry::Column(name));
        self
    }

    pub fn group(mut self, nested: Descriptor) -> Self {
        self.entries.push(Entry::Group(nested));
        self
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Flattened column names, depth-first.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns(&self, out: &mut Vec<&'static str>) {
        for entry in &self.entries {
            match entry {
                Entry::Column(name) => out.push(*name),
                Entry::Group(nested) => nested.collect_columns(out),
            }
        }
    }
}
