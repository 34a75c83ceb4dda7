use super::fields::{escape, Fields};
use super::{Decoded, LineRecord, MEMBER_FIELD_DELIMITER, MEMBER_LIST_DELIMITER};
use crate::error::{AppError, AppResult};
use crate::models::member::{Member, MemberDetails, MemberKind};

/// Fields before the optional borrowed list, per member kind
const CIVILIAN_FIELDS: usize = 8;
const STUDENT_FIELDS: usize = 7;

impl LineRecord for Member {
    const LIST_DELIMITER: &'static str = MEMBER_LIST_DELIMITER;

    fn encode_line(&self) -> String {
        let mut fields = vec![
            self.kind().tag().to_string(),
            escape(&self.name),
            escape(&self.address),
            self.gender().as_code().to_string(),
            self.age().to_string(),
            escape(self.phone_number()),
            escape(self.id()),
        ];
        if let MemberKind::Civilian { balance } = self.kind() {
            fields.push(balance.to_string());
        }
        if !self.borrowed().is_empty() {
            let serials: Vec<String> = self.borrowed().iter().map(u64::to_string).collect();
            fields.push(serials.join(MEMBER_LIST_DELIMITER));
        }
        fields.join(MEMBER_FIELD_DELIMITER)
    }

    fn decode_line(line: &str) -> AppResult<Decoded<Self>> {
        let fields = Fields::split(line, MEMBER_FIELD_DELIMITER, "member");
        let tag = fields.text(0)?;
        let fixed = match tag.as_str() {
            "C" => CIVILIAN_FIELDS,
            "S" => STUDENT_FIELDS,
            other => {
                return Err(AppError::Decode(format!("unknown member kind {:?}", other)));
            }
        };
        fields.expect_count(fixed)?;

        let details = MemberDetails {
            name: fields.text(1)?,
            address: fields.text(2)?,
            gender: fields.code(3, "gender")?,
            age: fields.number(4, "age")?,
            phone_number: fields.text(5)?,
        };
        let id = fields.text(6)?;
        if id.is_empty() {
            return Err(AppError::Decode("member line has an empty id".to_string()));
        }

        let balance = if fixed == CIVILIAN_FIELDS {
            Some(fields.number(7, "balance")?)
        } else {
            None
        };

        Ok(Decoded {
            record: Member::restore(&id, details, balance),
            references: fields.references(fixed),
        })
    }
}
