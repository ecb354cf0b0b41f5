use std::str::FromStr;
use serde::{de::{Unexpected, Visitor}, Deserialize, Serialize, Serializer};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// The slack slash commands that this tool must respond to.
#[derive(Debug, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr, Clone, Copy)]
pub enum PlaneSlackCommand {
    #[strum(serialize="/plane")]
    Plane
}

impl Serialize for PlaneSlackCommand {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_str(self.into())
    }
}

impl <'d> Deserialize<'d> for PlaneSlackCommand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: serde::Deserializer<'d> {
        deserializer.deserialize_str(PlaneSlackCommandVisitor)
    }
}

struct PlaneSlackCommandVisitor;

impl <'de> Visitor<'de> for PlaneSlackCommandVisitor {
    type Value = PlaneSlackCommand;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        let commands = PlaneSlackCommand::iter().map(|c| c.into()).collect::<Vec<&str>>();
        formatter.write_str(&format!("Any of {}.", commands.join(", ")))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> where E: serde::de::Error {
        PlaneSlackCommand::from_str(v)
            .map_err(|_| serde::de::Error::invalid_value(Unexpected::Str(v), &self))
    }
}
