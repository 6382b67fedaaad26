//! Wire types for `aws ec2 describe-volumes --output json`.

use serde::Deserialize;

use crate::volume::Volume;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(super) struct DescribeVolumesOutput {
    #[serde(rename = "Volumes")]
    pub(super) volumes: Vec<AwsVolume>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub(super) struct AwsVolume {
    #[serde(rename = "VolumeId")]
    pub(super) volume_id: String,
    #[serde(rename = "Size")]
    pub(super) size: u32,
    #[serde(rename = "AvailabilityZone")]
    pub(super) availability_zone: String,
    #[serde(rename = "State")]
    pub(super) state: String,
}

impl From<AwsVolume> for Volume {
    fn from(value: AwsVolume) -> Self {
        Self::new(
            value.volume_id,
            value.size,
            value.availability_zone,
            value.state,
        )
    }
}
