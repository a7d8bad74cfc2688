//! Loader for the four time-constant tables of the neuromodulated timing rule

use crate::{error::Result, image::ImageReader, table::DecayTable};
use log::debug;

/// The four decay tables, in image order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TauTables {
    /// Pre-synaptic trace decay
    pub tau_plus: DecayTable,
    /// Post-synaptic trace decay
    pub tau_minus: DecayTable,
    /// Eligibility trace decay
    pub tau_c: DecayTable,
    /// Reward (dopamine) trace decay
    pub tau_d: DecayTable,
}

/// Tables plus the offset of the first byte after them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTables {
    /// The decoded tables
    pub tables: TauTables,
    /// Offset immediately after the `tau_d` table
    pub next_offset: usize,
}

/// Read `tau_plus`, `tau_minus`, `tau_c` and `tau_d` back-to-back from `image`
///
/// Either all four tables are returned or none are. Each table is validated
/// (non-negative, non-increasing) before it is accepted.
pub fn load_four(image: &[u8], start_offset: usize) -> Result<LoadedTables> {
    let mut reader = ImageReader::at(image, start_offset)?;

    let tau_plus = read_validated(&mut reader, "tau_plus")?;
    let tau_minus = read_validated(&mut reader, "tau_minus")?;
    let tau_c = read_validated(&mut reader, "tau_c")?;
    let tau_d = read_validated(&mut reader, "tau_d")?;

    Ok(LoadedTables {
        tables: TauTables {
            tau_plus,
            tau_minus,
            tau_c,
            tau_d,
        },
        next_offset: reader.offset(),
    })
}

fn read_validated(reader: &mut ImageReader<'_>, name: &str) -> Result<DecayTable> {
    let offset = reader.offset();
    let table = reader.read_table()?;
    table.validate()?;
    debug!(
        "Loaded {} table at offset {}: {} entries, shift {}",
        name,
        offset,
        table.size(),
        table.shift()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{LutError, MalformedReason},
        image::ImageWriter,
    };

    fn image_with(tables: &[&[i16]]) -> Vec<u8> {
        let mut writer = ImageWriter::new();
        for entries in tables {
            writer.write_raw_table(0, entries);
        }
        writer.finish()
    }

    #[test]
    fn test_load_at_offset() {
        let mut image = vec![0xAA; 8];
        image.extend(image_with(&[&[2048, 1], &[2000, 2], &[1900, 3], &[1800, 4]]));

        let loaded = load_four(&image, 8).unwrap();
        assert_eq!(loaded.next_offset, 8 + 4 * 8);
        assert_eq!(loaded.tables.tau_plus.peak().to_raw(), 2048);
        assert_eq!(loaded.tables.tau_minus.peak().to_raw(), 2000);
        assert_eq!(loaded.tables.tau_c.peak().to_raw(), 1900);
        assert_eq!(loaded.tables.tau_d.peak().to_raw(), 1800);
    }

    #[test]
    fn test_start_offset_past_end() {
        let image = image_with(&[&[1], &[1], &[1], &[1]]);
        assert!(matches!(
            load_four(&image, image.len() + 1),
            Err(LutError::TruncatedImage { .. })
        ));
    }

    #[test]
    fn test_rejects_increasing_table() {
        let image = image_with(&[&[2048, 1], &[2048, 1], &[5, 6], &[2048, 1]]);
        assert_eq!(
            load_four(&image, 0).unwrap_err(),
            LutError::malformed(MalformedReason::Increasing { index: 1 })
        );
    }
}
