/// In-memory OPC package used for writing.
///
/// OpcPackage collects parts in insertion order together with the
/// package-level relationships; `PackageWriter` serializes it.
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::Part;
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashSet;

pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts in the package, in the order they were added
    parts: Vec<Box<dyn Part>>,

    /// Partnames already present, for duplicate detection
    names: HashSet<String>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: Vec::new(),
            names: HashSet::new(),
        }
    }

    /// Add a part to the package.
    ///
    /// # Errors
    /// Returns `DuplicatePart` if a part with the same partname exists.
    pub fn add_part(&mut self, part: Box<dyn Part>) -> Result<()> {
        let name = part.partname().to_string();
        if !self.names.insert(name.clone()) {
            return Err(OpcError::DuplicatePart(name));
        }
        self.parts.push(part);
        Ok(())
    }

    /// Relate the package itself to a part, returning the rId.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(PACKAGE_URI);
        self.rels.get_or_add(reltype, &target_ref)
    }

    /// Get a part by partname.
    pub fn part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .iter()
            .find(|part| part.partname() == partname)
            .map(|part| part.as_ref())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Iterate over all parts in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.iter().map(|part| part.as_ref())
    }

    /// Package-level relationships.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}
