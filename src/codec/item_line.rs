use chrono::{DateTime, Utc};

use super::fields::{escape, Fields};
use super::{Decoded, LineRecord, ITEM_FIELD_DELIMITER, ITEM_LIST_DELIMITER};
use crate::error::{AppError, AppResult};
use crate::models::enums::ItemStatus;
use crate::models::item::{Item, ItemDetails, ItemKind};

/// Fields before the optional past-owner list
const ITEM_FIELDS: usize = 9;

impl LineRecord for Item {
    const LIST_DELIMITER: &'static str = ITEM_LIST_DELIMITER;

    fn encode_line(&self) -> String {
        let kind_field = match self.kind() {
            ItemKind::Book { pages } => pages.to_string(),
            ItemKind::Dvd { size_mb } => size_mb.to_string(),
        };
        let mut fields = vec![
            self.kind().tag().to_string(),
            self.serial_number().to_string(),
            escape(&self.title),
            escape(&self.author),
            escape(&self.publisher),
            self.status().as_code().to_string(),
            escape(&self.genre),
            self.date_available().timestamp_millis().to_string(),
            kind_field,
        ];
        if !self.past_owners().is_empty() {
            let owners: Vec<String> = self.past_owners().iter().map(|id| escape(id)).collect();
            fields.push(owners.join(ITEM_LIST_DELIMITER));
        }
        fields.join(ITEM_FIELD_DELIMITER)
    }

    fn decode_line(line: &str) -> AppResult<Decoded<Self>> {
        let fields = Fields::split(line, ITEM_FIELD_DELIMITER, "item");
        let tag = fields.text(0)?;
        if tag != "B" && tag != "D" {
            return Err(AppError::Decode(format!("unknown item kind {:?}", tag)));
        }
        fields.expect_count(ITEM_FIELDS)?;

        let serial = fields.number(1, "serial number")?;
        let details = ItemDetails {
            title: fields.text(2)?,
            author: fields.text(3)?,
            publisher: fields.text(4)?,
            genre: fields.text(6)?,
        };
        let status = ItemStatus::from(fields.code(5, "status")?);
        let millis: i64 = fields.number(7, "availability date")?;
        let date_available = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            AppError::Decode(format!("item line has an out-of-range date {}", millis))
        })?;
        let kind = if tag == "B" {
            ItemKind::book(fields.number(8, "page count")?)
        } else {
            ItemKind::dvd(fields.number(8, "size")?)
        };

        Ok(Decoded {
            record: Item::restore(serial, details, status, date_available, kind),
            references: fields.references(ITEM_FIELDS),
        })
    }
}
