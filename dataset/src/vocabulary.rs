//! FILENAME: dataset/src/vocabulary.rs
//! PURPOSE: The fixed column vocabulary of an enrollment upload.
//! CONTEXT: Dimension columns form a strict administrative hierarchy and the
//! measure columns follow a closed `{Level} {Gender}` / `G11 {Track} {Gender}`
//! naming scheme. Everything downstream resolves columns through the tables
//! in this module instead of matching substrings of raw headers.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// DIMENSIONS
// ============================================================================

/// A categorical column of the administrative hierarchy.
/// Declaration order is the dependency order of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Region,
    Province,
    Division,
    District,
    Municipality,
    #[serde(rename = "Legislative District")]
    LegislativeDistrict,
    Sector,
    #[serde(rename = "School Type")]
    SchoolType,
    #[serde(rename = "Modified COC")]
    ModifiedCoc,
    #[serde(rename = "School Subclassification")]
    SchoolSubclassification,
}

impl Dimension {
    /// All dimensions in hierarchy order.
    pub const ALL: [Dimension; 10] = [
        Dimension::Region,
        Dimension::Province,
        Dimension::Division,
        Dimension::District,
        Dimension::Municipality,
        Dimension::LegislativeDistrict,
        Dimension::Sector,
        Dimension::SchoolType,
        Dimension::ModifiedCoc,
        Dimension::SchoolSubclassification,
    ];

    /// Normalized header name of this dimension's column.
    pub fn column_name(self) -> &'static str {
        match self {
            Dimension::Region => "Region",
            Dimension::Province => "Province",
            Dimension::Division => "Division",
            Dimension::District => "District",
            Dimension::Municipality => "Municipality",
            Dimension::LegislativeDistrict => "Legislative District",
            Dimension::Sector => "Sector",
            Dimension::SchoolType => "School Type",
            Dimension::ModifiedCoc => "Modified COC",
            Dimension::SchoolSubclassification => "School Subclassification",
        }
    }

    /// Case-insensitive lookup by column name. Also accepts the names without
    /// spaces (`"SchoolType"`), which is what command lines tend to produce.
    pub fn from_column_name(name: &str) -> Option<Self> {
        let wanted: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        Dimension::ALL.into_iter().find(|dim| {
            let own: String = dim.column_name().chars().filter(|c| !c.is_whitespace()).collect();
            own.eq_ignore_ascii_case(&wanted)
        })
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn suffix(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// GRADE LEVELS
// ============================================================================

/// Kindergarten through grade 10, plus the two non-graded buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeLevel {
    K,
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    ElemNg,
    G7,
    G8,
    G9,
    G10,
    JhsNg,
}

impl GradeLevel {
    /// Vocabulary order: elementary block, then junior high block.
    pub const ALL: [GradeLevel; 13] = [
        GradeLevel::K,
        GradeLevel::G1,
        GradeLevel::G2,
        GradeLevel::G3,
        GradeLevel::G4,
        GradeLevel::G5,
        GradeLevel::G6,
        GradeLevel::ElemNg,
        GradeLevel::G7,
        GradeLevel::G8,
        GradeLevel::G9,
        GradeLevel::G10,
        GradeLevel::JhsNg,
    ];

    pub const ELEMENTARY: [GradeLevel; 8] = [
        GradeLevel::K,
        GradeLevel::G1,
        GradeLevel::G2,
        GradeLevel::G3,
        GradeLevel::G4,
        GradeLevel::G5,
        GradeLevel::G6,
        GradeLevel::ElemNg,
    ];

    pub const JUNIOR_HIGH: [GradeLevel; 5] = [
        GradeLevel::G7,
        GradeLevel::G8,
        GradeLevel::G9,
        GradeLevel::G10,
        GradeLevel::JhsNg,
    ];

    /// Order of the per-grade average view: graded levels first, non-graded last.
    pub const AVERAGE_ORDER: [GradeLevel; 13] = [
        GradeLevel::K,
        GradeLevel::G1,
        GradeLevel::G2,
        GradeLevel::G3,
        GradeLevel::G4,
        GradeLevel::G5,
        GradeLevel::G6,
        GradeLevel::G7,
        GradeLevel::G8,
        GradeLevel::G9,
        GradeLevel::G10,
        GradeLevel::ElemNg,
        GradeLevel::JhsNg,
    ];

    /// Column prefix, e.g. `"G3"` or `"Elem NG"`.
    pub fn column_prefix(self) -> &'static str {
        match self {
            GradeLevel::K => "K",
            GradeLevel::G1 => "G1",
            GradeLevel::G2 => "G2",
            GradeLevel::G3 => "G3",
            GradeLevel::G4 => "G4",
            GradeLevel::G5 => "G5",
            GradeLevel::G6 => "G6",
            GradeLevel::ElemNg => "Elem NG",
            GradeLevel::G7 => "G7",
            GradeLevel::G8 => "G8",
            GradeLevel::G9 => "G9",
            GradeLevel::G10 => "G10",
            GradeLevel::JhsNg => "JHS NG",
        }
    }

    /// Axis tick label inside a single-level chart (both NG buckets read "NG").
    pub fn chart_label(self) -> &'static str {
        match self {
            GradeLevel::ElemNg | GradeLevel::JhsNg => "NG",
            other => other.column_prefix(),
        }
    }

    /// Label in the mixed-level average view, where the NG buckets must differ.
    pub fn average_label(self) -> &'static str {
        match self {
            GradeLevel::ElemNg => "E-NG",
            GradeLevel::JhsNg => "J-NG",
            other => other.column_prefix(),
        }
    }

    pub fn education_level(self) -> EducationLevel {
        match self {
            GradeLevel::G7
            | GradeLevel::G8
            | GradeLevel::G9
            | GradeLevel::G10
            | GradeLevel::JhsNg => EducationLevel::JuniorHigh,
            _ => EducationLevel::Elementary,
        }
    }

    /// The (male, female) columns of this grade.
    pub fn group(self) -> &'static MeasureGroup {
        &GRADE_GROUPS[self as usize]
    }

    pub fn column(self, gender: Gender) -> &'static str {
        &MEASURE_COLUMNS[(self as usize) * 2 + gender.index()].name
    }
}

// ============================================================================
// SENIOR HIGH TRACKS
// ============================================================================

/// The two senior-high grades carrying track columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeniorGrade {
    G11,
    G12,
}

impl SeniorGrade {
    pub const ALL: [SeniorGrade; 2] = [SeniorGrade::G11, SeniorGrade::G12];

    pub fn column_prefix(self) -> &'static str {
        match self {
            SeniorGrade::G11 => "G11",
            SeniorGrade::G12 => "G12",
        }
    }
}

/// Senior-high strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    AcadAbm,
    AcadHumss,
    AcadStem,
    AcadGas,
    AcadPbm,
    Tvl,
    Sports,
    Arts,
}

impl Track {
    pub const ALL: [Track; 8] = [
        Track::AcadAbm,
        Track::AcadHumss,
        Track::AcadStem,
        Track::AcadGas,
        Track::AcadPbm,
        Track::Tvl,
        Track::Sports,
        Track::Arts,
    ];

    /// Middle part of the column name, e.g. `"ACAD STEM"`.
    pub fn column_stem(self) -> &'static str {
        match self {
            Track::AcadAbm => "ACAD ABM",
            Track::AcadHumss => "ACAD HUMSS",
            Track::AcadStem => "ACAD STEM",
            Track::AcadGas => "ACAD GAS",
            Track::AcadPbm => "ACAD PBM",
            Track::Tvl => "TVL",
            Track::Sports => "SPORTS",
            Track::Arts => "ARTS",
        }
    }

    /// Display label with the `ACAD ` prefix dropped.
    pub fn label(self) -> &'static str {
        let stem = self.column_stem();
        stem.strip_prefix("ACAD ").unwrap_or(stem)
    }

    /// Pairs are ordered G11 first, then G12.
    pub fn group(self) -> &'static MeasureGroup {
        &TRACK_GROUPS[self as usize]
    }

    pub fn column(self, grade: SeniorGrade, gender: Gender) -> &'static str {
        let idx = GRADE_COLUMN_COUNT
            + ((grade as usize) * Track::ALL.len() + self as usize) * 2
            + gender.index();
        &MEASURE_COLUMNS[idx].name
    }
}

// ============================================================================
// EDUCATION LEVELS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    Elementary,
    JuniorHigh,
    SeniorHigh,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 3] = [
        EducationLevel::Elementary,
        EducationLevel::JuniorHigh,
        EducationLevel::SeniorHigh,
    ];

    /// Label on the enrollment-by-level chart.
    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::Elementary => "Elementary",
            EducationLevel::JuniorHigh => "Junior HS",
            EducationLevel::SeniorHigh => "Senior HS",
        }
    }

    /// Short label on the year-over-year comparison chart.
    pub fn short_label(self) -> &'static str {
        match self {
            EducationLevel::Elementary => "Elementary",
            EducationLevel::JuniorHigh => "JHS",
            EducationLevel::SeniorHigh => "SHS",
        }
    }

    pub fn group(self) -> &'static MeasureGroup {
        &LEVEL_GROUPS[self as usize]
    }
}

// ============================================================================
// MEASURE COLUMNS & GROUPS
// ============================================================================

/// What a measure column counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureAxis {
    Grade(GradeLevel),
    Track(SeniorGrade, Track),
}

/// One entry of the measure vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureColumn {
    pub name: String,
    pub gender: Gender,
    pub axis: MeasureAxis,
}

/// A male/female pair of measure columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPair {
    pub male: &'static str,
    pub female: &'static str,
}

impl ColumnPair {
    pub fn get(&self, gender: Gender) -> &'static str {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

/// A named, fixed list of column pairs along one semantic axis.
#[derive(Debug, Clone)]
pub struct MeasureGroup {
    pub label: &'static str,
    pub pairs: Vec<ColumnPair>,
}

impl MeasureGroup {
    pub fn columns(&self, gender: Gender) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(move |pair| pair.get(gender))
    }
}

const GRADE_COLUMN_COUNT: usize = GradeLevel::ALL.len() * 2;

/// Every measure column: the 26 grade columns in vocabulary order, then the
/// 32 track columns (G11 tracks, then G12 tracks), male before female.
pub static MEASURE_COLUMNS: Lazy<Vec<MeasureColumn>> = Lazy::new(|| {
    let mut columns = Vec::with_capacity(GRADE_COLUMN_COUNT + 32);
    for level in GradeLevel::ALL {
        for gender in Gender::ALL {
            columns.push(MeasureColumn {
                name: format!("{} {}", level.column_prefix(), gender.suffix()),
                gender,
                axis: MeasureAxis::Grade(level),
            });
        }
    }
    for grade in SeniorGrade::ALL {
        for track in Track::ALL {
            for gender in Gender::ALL {
                columns.push(MeasureColumn {
                    name: format!(
                        "{} {} {}",
                        grade.column_prefix(),
                        track.column_stem(),
                        gender.suffix()
                    ),
                    gender,
                    axis: MeasureAxis::Track(grade, track),
                });
            }
        }
    }
    columns
});

fn pair_for(index: usize) -> ColumnPair {
    ColumnPair {
        male: &MEASURE_COLUMNS[index].name,
        female: &MEASURE_COLUMNS[index + 1].name,
    }
}

static GRADE_GROUPS: Lazy<Vec<MeasureGroup>> = Lazy::new(|| {
    GradeLevel::ALL
        .iter()
        .map(|level| MeasureGroup {
            label: level.column_prefix(),
            pairs: vec![pair_for((*level as usize) * 2)],
        })
        .collect()
});

static TRACK_GROUPS: Lazy<Vec<MeasureGroup>> = Lazy::new(|| {
    Track::ALL
        .iter()
        .map(|track| MeasureGroup {
            label: track.label(),
            pairs: SeniorGrade::ALL
                .iter()
                .map(|grade| ColumnPair {
                    male: track.column(*grade, Gender::Male),
                    female: track.column(*grade, Gender::Female),
                })
                .collect(),
        })
        .collect()
});

static LEVEL_GROUPS: Lazy<Vec<MeasureGroup>> = Lazy::new(|| {
    EducationLevel::ALL
        .iter()
        .map(|level| {
            let pairs = match level {
                EducationLevel::Elementary => GradeLevel::ELEMENTARY
                    .iter()
                    .map(|g| g.group().pairs[0])
                    .collect(),
                EducationLevel::JuniorHigh => GradeLevel::JUNIOR_HIGH
                    .iter()
                    .map(|g| g.group().pairs[0])
                    .collect(),
                EducationLevel::SeniorHigh => SeniorGrade::ALL
                    .iter()
                    .flat_map(|grade| {
                        Track::ALL.iter().map(move |track| ColumnPair {
                            male: track.column(*grade, Gender::Male),
                            female: track.column(*grade, Gender::Female),
                        })
                    })
                    .collect(),
            };
            MeasureGroup {
                label: level.label(),
                pairs,
            }
        })
        .collect()
});

/// Whether `name` is one of the fixed measure columns.
pub fn is_measure_column(name: &str) -> bool {
    MEASURE_COLUMNS.iter().any(|c| c.name == name)
}
