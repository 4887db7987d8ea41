use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{WidgetError, WidgetResult};

use super::fields;

/// How a data field treats table-like input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataPolicy {
    /// Tables become row records; record sequences are kept as given.
    Normalize,
    /// Tables and record sequences are both stored as given.
    PassThrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessorSpec {
    pub name: Cow<'static, str>,
    pub default: Cow<'static, str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFieldSpec {
    pub name: Cow<'static, str>,
    pub policy: DataPolicy,
}

/// Host-side field that is never sent to the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalFieldSpec {
    pub name: Cow<'static, str>,
    pub default: Value,
}

/// Declarative description of one chart variant.
///
/// The tag names the custom element the front-end instantiates. Accessors and
/// data fields are declared in the order they are advertised to the peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    tag: Cow<'static, str>,
    data_fields: Vec<DataFieldSpec>,
    accessors: Vec<AccessorSpec>,
    #[serde(default)]
    local_fields: Vec<LocalFieldSpec>,
}

impl ChartDescriptor {
    #[must_use]
    pub fn builder(tag: impl Into<Cow<'static, str>>) -> ChartDescriptorBuilder {
        ChartDescriptorBuilder {
            descriptor: Self {
                tag: tag.into(),
                data_fields: Vec::new(),
                accessors: Vec::new(),
                local_fields: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn data_fields(&self) -> &[DataFieldSpec] {
        &self.data_fields
    }

    /// The data field addressed by `ChartWidget::set_data`.
    #[must_use]
    pub fn primary_data_field(&self) -> &str {
        self.data_fields
            .first()
            .map_or(fields::DATA, |field| &*field.name)
    }

    #[must_use]
    pub fn accessors(&self) -> &[AccessorSpec] {
        &self.accessors
    }

    #[must_use]
    pub fn accessor_default(&self, name: &str) -> Option<&str> {
        self.accessors
            .iter()
            .find(|accessor| accessor.name == name)
            .map(|accessor| &*accessor.default)
    }

    #[must_use]
    pub fn local_fields(&self) -> &[LocalFieldSpec] {
        &self.local_fields
    }

    /// Checks tag and field names. Built-in descriptors always pass.
    pub fn validate(&self) -> WidgetResult<()> {
        if self.tag.is_empty() {
            return Err(WidgetError::InvalidDescriptor(
                "chart tag must not be empty".to_owned(),
            ));
        }
        if self.data_fields.is_empty() {
            return Err(WidgetError::InvalidDescriptor(format!(
                "chart `{}` declares no data field",
                self.tag
            )));
        }

        let names = self
            .data_fields
            .iter()
            .map(|field| &*field.name)
            .chain(self.accessors.iter().map(|accessor| &*accessor.name))
            .chain(self.local_fields.iter().map(|field| &*field.name));
        let mut seen: Vec<&str> = fields::RESERVED.to_vec();
        for name in names {
            if name.is_empty() {
                return Err(WidgetError::InvalidDescriptor(format!(
                    "chart `{}` declares an empty field name",
                    self.tag
                )));
            }
            if seen.contains(&name) {
                return Err(WidgetError::InvalidDescriptor(format!(
                    "chart `{}` declares field `{name}` twice or shadows a reserved field",
                    self.tag
                )));
            }
            seen.push(name);
        }
        Ok(())
    }
}

pub struct ChartDescriptorBuilder {
    descriptor: ChartDescriptor,
}

impl ChartDescriptorBuilder {
    #[must_use]
    pub fn data_field(mut self, name: impl Into<Cow<'static, str>>, policy: DataPolicy) -> Self {
        self.descriptor.data_fields.push(DataFieldSpec {
            name: name.into(),
            policy,
        });
        self
    }

    #[must_use]
    pub fn accessor(
        mut self,
        name: impl Into<Cow<'static, str>>,
        default: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.descriptor.accessors.push(AccessorSpec {
            name: name.into(),
            default: default.into(),
        });
        self
    }

    #[must_use]
    pub fn local_field(mut self, name: impl Into<Cow<'static, str>>, default: Value) -> Self {
        self.descriptor.local_fields.push(LocalFieldSpec {
            name: name.into(),
            default,
        });
        self
    }

    pub fn build(self) -> WidgetResult<ChartDescriptor> {
        self.descriptor.validate()?;
        Ok(self.descriptor)
    }
}

/// The chart components shipped by the front-end module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartVariant {
    BarChart,
    ClusteredBarChart,
    StackedBarChart,
    LineChart,
    PieChart,
    ScatterPlot,
    HeatMap,
    CirclePacking,
    ParallelPlot,
    DumbbellPlot,
    WorldMap,
    AlluvialDiagram,
}

const ORDINAL_BAR_ACCESSORS: &[(&str, &str)] = &[
    ("ordinalAccessor", "label"),
    ("valueAccessor", "value"),
    ("groupAccessor", ""),
];

const SERIES_ACCESSORS: &[(&str, &str)] = &[
    ("ordinalAccessor", ""),
    ("valueAccessor", ""),
    ("seriesAccessor", ""),
];

impl ChartVariant {
    pub const ALL: [Self; 12] = [
        Self::BarChart,
        Self::ClusteredBarChart,
        Self::StackedBarChart,
        Self::LineChart,
        Self::PieChart,
        Self::ScatterPlot,
        Self::HeatMap,
        Self::CirclePacking,
        Self::ParallelPlot,
        Self::DumbbellPlot,
        Self::WorldMap,
        Self::AlluvialDiagram,
    ];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::BarChart => "bar-chart",
            Self::ClusteredBarChart => "clustered-bar-chart",
            Self::StackedBarChart => "stacked-bar-chart",
            Self::LineChart => "line-chart",
            Self::PieChart => "pie-chart",
            Self::ScatterPlot => "scatter-plot",
            Self::HeatMap => "heat-map",
            Self::CirclePacking => "circle-packing",
            Self::ParallelPlot => "parallel-plot",
            Self::DumbbellPlot => "dumbbell-plot",
            Self::WorldMap => "world-map",
            Self::AlluvialDiagram => "alluvial-diagram",
        }
    }

    #[must_use]
    pub fn accessor_defaults(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::BarChart | Self::ClusteredBarChart | Self::StackedBarChart => {
                ORDINAL_BAR_ACCESSORS
            }
            Self::LineChart => &[
                ("ordinalAccessor", "label"),
                ("valueAccessor", "value"),
                ("seriesAccessor", ""),
            ],
            Self::PieChart => &[("ordinalAccessor", "label"), ("valueAccessor", "value")],
            Self::ScatterPlot => &[
                ("xAccessor", "item"),
                ("yAccessor", "value"),
                ("groupAccessor", "group"),
            ],
            Self::HeatMap => &[
                ("xAccessor", "date"),
                ("yAccessor", "category"),
                ("valueAccessor", "value"),
            ],
            Self::CirclePacking => &[
                ("nodeAccessor", ""),
                ("parentAccessor", ""),
                ("sizeAccessor", ""),
            ],
            Self::ParallelPlot | Self::DumbbellPlot => SERIES_ACCESSORS,
            Self::WorldMap => &[
                ("joinAccessor", ""),
                ("joinNameAccessor", ""),
                ("markerAccessor", ""),
                ("markerNameAccessor", ""),
                ("latitudeAccessor", ""),
                ("longitudeAccessor", ""),
                ("valueAccessor", ""),
                ("groupAccessor", ""),
            ],
            Self::AlluvialDiagram => &[
                ("sourceAccessor", ""),
                ("targetAccessor", ""),
                ("valueAccessor", ""),
                ("nodeIDAccessor", ""),
                ("groupAccessor", ""),
            ],
        }
    }

    #[must_use]
    pub fn data_fields(self) -> &'static [(&'static str, DataPolicy)] {
        match self {
            // Node rows are handed to the front-end exactly as supplied.
            Self::AlluvialDiagram => &[
                (fields::LINK_DATA, DataPolicy::Normalize),
                (fields::NODE_DATA, DataPolicy::PassThrough),
            ],
            _ => &[(fields::DATA, DataPolicy::Normalize)],
        }
    }

    #[must_use]
    pub fn descriptor(self) -> ChartDescriptor {
        ChartDescriptor {
            tag: Cow::Borrowed(self.tag()),
            data_fields: self
                .data_fields()
                .iter()
                .map(|&(name, policy)| DataFieldSpec {
                    name: Cow::Borrowed(name),
                    policy,
                })
                .collect(),
            accessors: self
                .accessor_defaults()
                .iter()
                .map(|&(name, default)| AccessorSpec {
                    name: Cow::Borrowed(name),
                    default: Cow::Borrowed(default),
                })
                .collect(),
            local_fields: Vec::new(),
        }
    }
}

impl fmt::Display for ChartVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ChartVariant {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.tag() == s)
            .ok_or_else(|| WidgetError::InvalidDescriptor(format!("unknown chart type `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_descriptors_validate() {
        for variant in ChartVariant::ALL {
            variant.descriptor().validate().expect("builtin descriptor");
        }
    }

    #[test]
    fn builder_rejects_reserved_names() {
        let err = ChartDescriptor::builder("gauge")
            .data_field("data", DataPolicy::Normalize)
            .accessor("mainTitle", "")
            .build()
            .expect_err("reserved accessor name");
        assert!(err.to_string().contains("mainTitle"));
    }

    #[test]
    fn builder_requires_a_data_field() {
        assert!(ChartDescriptor::builder("gauge").build().is_err());
    }
}
