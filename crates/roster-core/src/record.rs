//! Personnel records, the single entity of the roster.
//!
//! A record is a flat bag of input fields (dates, title, adjustment days)
//! plus the fields the rule engine derives from them. Records are replaced
//! wholesale on edit; nothing here is updated in place by storage.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::EnumIter;
use uuid::Uuid;

/// On-disk and on-screen marker for [`TriState::NotApplicable`].
pub const NOT_APPLICABLE: &str = "-";

// ─── TriState ────────────────────────────────────────────────────────────────

/// A slot that is either filled, structurally not applicable for the
/// record's title, or simply not filled in yet.
///
/// Serialises as the bare value, `"-"` or `""` so persisted rosters keep
/// the plain string layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState<T> {
  Value(T),
  NotApplicable,
  #[default]
  Empty,
}

impl<T> TriState<T> {
  pub fn value(&self) -> Option<&T> {
    match self {
      Self::Value(v) => Some(v),
      _ => None,
    }
  }

  pub fn is_not_applicable(&self) -> bool { matches!(self, Self::NotApplicable) }

  pub fn is_empty(&self) -> bool { matches!(self, Self::Empty) }

  pub fn as_ref(&self) -> TriState<&T> {
    match self {
      Self::Value(v) => TriState::Value(v),
      Self::NotApplicable => TriState::NotApplicable,
      Self::Empty => TriState::Empty,
    }
  }
}

impl TriState<String> {
  /// Interpret free-text input: blank is `Empty`, `"-"` is `NotApplicable`.
  pub fn from_text(input: impl Into<String>) -> Self {
    let input = input.into();
    match input.trim() {
      "" => Self::Empty,
      NOT_APPLICABLE => Self::NotApplicable,
      _ => Self::Value(input),
    }
  }
}

impl<T: fmt::Display> fmt::Display for TriState<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Value(v) => v.fmt(f),
      Self::NotApplicable => f.write_str(NOT_APPLICABLE),
      Self::Empty => Ok(()),
    }
  }
}

impl<T: Serialize> Serialize for TriState<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Value(v) => v.serialize(serializer),
      Self::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
      Self::Empty => serializer.serialize_str(""),
    }
  }
}

impl<'de, T> Deserialize<'de> for TriState<T>
where
  T: FromStr,
  T::Err: fmt::Display,
{
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
      None | Some("") => Ok(Self::Empty),
      Some(NOT_APPLICABLE) => Ok(Self::NotApplicable),
      Some(s) => s.parse().map(Self::Value).map_err(serde::de::Error::custom),
    }
  }
}

// ─── Title ───────────────────────────────────────────────────────────────────

/// Staff rank. Variant order is seniority order, junior first.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Title {
  #[serde(rename = "Müfettiş Yardımcısı")]
  AssistantInspector,
  #[serde(rename = "Yetkili Müfettiş Yardımcısı")]
  AuthorizedAssistantInspector,
  #[serde(rename = "Müfettiş")]
  Inspector,
  #[serde(rename = "Kıdemli Müfettiş")]
  SeniorInspector,
  #[serde(rename = "Başmüfettiş")]
  ChiefInspector,
  #[serde(rename = "Başkan Yardımcısı")]
  ViceChair,
  #[serde(rename = "Başkan")]
  Chair,
}

impl Title {
  pub fn label(self) -> &'static str {
    match self {
      Self::AssistantInspector => "Müfettiş Yardımcısı",
      Self::AuthorizedAssistantInspector => "Yetkili Müfettiş Yardımcısı",
      Self::Inspector => "Müfettiş",
      Self::SeniorInspector => "Kıdemli Müfettiş",
      Self::ChiefInspector => "Başmüfettiş",
      Self::ViceChair => "Başkan Yardımcısı",
      Self::Chair => "Başkan",
    }
  }

  /// Position in the seniority ladder, 0 for the most junior rank.
  pub fn rank(self) -> u8 { self as u8 }

  /// Years of audit seniority needed before the next promotion, or `None`
  /// for ranks that are not reviewed for promotion.
  pub fn required_years(self) -> Option<u32> {
    match self {
      Self::AssistantInspector => Some(2),
      Self::AuthorizedAssistantInspector => Some(3),
      Self::Inspector => Some(5),
      Self::SeniorInspector => Some(7),
      Self::ChiefInspector | Self::ViceChair | Self::Chair => None,
    }
  }

  /// Whether promotion eligibility is tracked at all for this rank.
  pub fn promotion_applies(self) -> bool {
    !matches!(self, Self::ChiefInspector | Self::ViceChair | Self::Chair)
  }

  /// Assistant inspectors do not carry a seal.
  pub fn seal_applies(self) -> bool { self != Self::AssistantInspector }

  /// The chair and vice chairs sit above the division level.
  pub fn division_applies(self) -> bool { !matches!(self, Self::ViceChair | Self::Chair) }
}

impl fmt::Display for Title {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

// ─── Department ──────────────────────────────────────────────────────────────

/// Organisational unit a staff member belongs to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Department {
  #[serde(rename = "Teftiş Kurulu Başkanlığı")]
  InspectionBoardChairmanship,
  #[serde(rename = "Bankacılık Denetimleri Başkan Yardımcılığı")]
  BankingAudits,
  #[serde(rename = "Bilgi Sistemleri Denetimleri Başkan Yardımcılığı")]
  InformationSystemsAudits,
}

impl Department {
  pub fn label(self) -> &'static str {
    match self {
      Self::InspectionBoardChairmanship => "Teftiş Kurulu Başkanlığı",
      Self::BankingAudits => "Bankacılık Denetimleri Başkan Yardımcılığı",
      Self::InformationSystemsAudits => "Bilgi Sistemleri Denetimleri Başkan Yardımcılığı",
    }
  }

  /// Divisions a member of this department may be assigned to.
  pub fn divisions(self) -> &'static [&'static str] {
    match self {
      Self::InspectionBoardChairmanship => &[],
      Self::BankingAudits => &[
        "Şube Denetimleri",
        "İştirak ve Birim Denetimleri",
        "İnceleme ve Soruşturma",
        "Merkezi Denetimler",
      ],
      Self::InformationSystemsAudits => &[
        "BS Merkezi Denetimler ve İnceleme",
        "Bilgi Sistemleri Süreç Denetimleri",
        "Denetim Analitiği",
      ],
    }
  }
}

impl fmt::Display for Department {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

// ─── Status / eligibility ────────────────────────────────────────────────────

/// Employment status. `Inactive` exactly when a termination date is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
  #[default]
  #[serde(rename = "Aktif")]
  Active,
  #[serde(rename = "Pasif")]
  Inactive,
}

impl Status {
  pub fn label(self) -> &'static str {
    match self {
      Self::Active => "Aktif",
      Self::Inactive => "Pasif",
    }
  }

  pub fn toggled(self) -> Self {
    match self {
      Self::Active => Self::Inactive,
      Self::Inactive => Self::Active,
    }
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Eligibility {
  #[default]
  #[serde(rename = "Evet")]
  Yes,
  #[serde(rename = "Hayır")]
  No,
}

impl Eligibility {
  pub fn label(self) -> &'static str {
    match self {
      Self::Yes => "Evet",
      Self::No => "Hayır",
    }
  }
}

impl fmt::Display for Eligibility {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for Eligibility {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "Evet" | "Yes" => Ok(Self::Yes),
      "Hayır" | "No" => Ok(Self::No),
      other => Err(format!("unknown eligibility value: {other:?}")),
    }
  }
}

// ─── PersonnelRecord ─────────────────────────────────────────────────────────

/// One staff member.
///
/// Field aliases accept the key names used by roster files exported from
/// the earlier desktop application, so those files import unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelRecord {
  /// Generated once on creation; never changes.
  pub id:                           Uuid,
  #[serde(alias = "sicilNo")]
  pub registry_number:              String,
  #[serde(alias = "adSoyad")]
  pub full_name:                    String,
  #[serde(alias = "unvan")]
  pub title:                        Title,
  #[serde(alias = "muhurNo", default)]
  pub seal_number:                  TriState<String>,
  #[serde(alias = "birim")]
  pub department:                   Department,
  #[serde(alias = "servis", default)]
  pub division:                     TriState<String>,
  #[serde(alias = "iseGirisTarihi")]
  pub hire_date:                    NaiveDate,
  #[serde(alias = "bankacilikKidemiBaslangicTarihi")]
  pub banking_seniority_start_date: NaiveDate,
  /// Days away from banking service; negative values add time.
  #[serde(alias = "ayriKalinanSureBankacilik", default)]
  pub banking_absence_days:         i64,
  #[serde(alias = "denetimKidemiBaslangicTarihi")]
  pub audit_seniority_start_date:   NaiveDate,
  #[serde(alias = "ayriKalinanSureDenetim", default)]
  pub audit_absence_days:           i64,
  /// Extra calendar days added on top of the computed promotion date.
  #[serde(alias = "terfiyeEklenecekSure", default)]
  pub promotion_bonus_days:         i64,
  #[serde(alias = "bankacilikKidemi", default)]
  pub banking_seniority_years:      f64,
  #[serde(alias = "denetimKidemi", default)]
  pub audit_seniority_years:        f64,
  #[serde(alias = "sonrakiTerfiTarihi", default)]
  pub next_promotion_date:          TriState<NaiveDate>,
  #[serde(alias = "terfiyeUygun", default)]
  pub promotion_eligible:           TriState<Eligibility>,
  #[serde(alias = "istenCikisTarihi", default, deserialize_with = "optional_date")]
  pub termination_date:             Option<NaiveDate>,
  #[serde(alias = "durum", default)]
  pub status:                       Status,
}

impl PersonnelRecord {
  pub fn is_active(&self) -> bool { self.status == Status::Active }
}

/// `null`, missing and `""` all mean "no termination date".
fn optional_date<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
  let raw: Option<String> = Option::deserialize(deserializer)?;
  match raw.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
  }
}
