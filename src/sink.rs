//! Output of the pipeline: a statement serialization or a list of identifiers.

use crate::error::Result;
use oxrdf::{NamedNodeRef, Triple};
use oxrdfio::{RdfFormat, RdfSerializer, WriterQuadSerializer};
use std::io::Write;

/// N-Triples serialization, one statement per line.
/// The serialization is framed once: opened on creation, closed by [`TripleSink::finish`].
pub struct TripleSink<W: Write> {
    serializer: WriterQuadSerializer<W>,
    written: u64,
}

impl<W: Write> TripleSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            serializer: RdfSerializer::from_format(RdfFormat::NTriples).for_writer(writer),
            written: 0,
        }
    }

    pub fn write(&mut self, triple: &Triple) -> Result<()> {
        self.serializer.serialize_triple(triple)?;
        self.written += 1;
        Ok(())
    }

    pub fn write_all<'a>(&mut self, triples: impl IntoIterator<Item = &'a Triple>) -> Result<u64> {
        let mut count = 0;
        for triple in triples {
            self.write(triple)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn finish(self) -> Result<W> {
        Ok(self.serializer.finish()?)
    }
}

/// Identifiers to retract, one `<iri>` per line
pub struct IdSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> IdSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn write<'a>(&mut self, id: impl Into<NamedNodeRef<'a>>) -> Result<()> {
        writeln!(self.writer, "{}", id.into())?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::{Literal, NamedNode};

    #[test]
    fn test_triple_sink_writes_ntriples() {
        let mut sink = TripleSink::new(Vec::new());
        let triple = Triple::new(
            NamedNode::new_unchecked("http://org.belgif.be/id/cbe/org/0671_516_647"),
            NamedNode::new_unchecked("http://www.w3.org/ns/regorg#legalName"),
            Literal::new_language_tagged_literal_unchecked("FOD BOSA", "nl"),
        );
        sink.write(&triple).unwrap();
        assert_eq!(sink.written(), 1);

        let output = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "<http://org.belgif.be/id/cbe/org/0671_516_647> <http://www.w3.org/ns/regorg#legalName> \"FOD BOSA\"@nl .\n"
        );
    }

    #[test]
    fn test_empty_triple_sink() {
        let sink = TripleSink::new(Vec::new());
        assert!(sink.finish().unwrap().is_empty());
    }

    #[test]
    fn test_id_sink_brackets_each_line() {
        let mut sink = IdSink::new(Vec::new());
        sink.write(&NamedNode::new_unchecked("http://org.belgif.be/id/cbe/org/0671_516_647"))
            .unwrap();
        sink.write(&NamedNode::new_unchecked("http://org.belgif.be/id/cbe/site/2_147_812_701"))
            .unwrap();

        assert_eq!(sink.written(), 2);
        assert_eq!(
            String::from_utf8(sink.finish().unwrap()).unwrap(),
            "<http://org.belgif.be/id/cbe/org/0671_516_647>\n<http://org.belgif.be/id/cbe/site/2_147_812_701>\n"
        );
    }
}
