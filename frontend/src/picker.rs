//! Dual-slot location picker constrained to a bounding box.
//!
//! The two slots are fully independent: either may be set first and
//! setting one never touches the other. An out-of-box pick is refused
//! outright, leaving the slot as it was; the page decides how to
//! surface the rejection.

use shared::{BoundingBox, Location};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("point {latitude},{longitude} is outside the searchable area")]
pub struct OutOfBounds {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LocationPicker {
    start: Option<Location>,
    end: Option<Location>,
}

impl LocationPicker {
    pub fn start(&self) -> Option<Location> {
        self.start
    }

    pub fn end(&self) -> Option<Location> {
        self.end
    }

    pub fn set_start(
        &mut self,
        location: Location,
        bounds: &BoundingBox,
    ) -> Result<(), OutOfBounds> {
        self.start = Some(checked(location, bounds)?);
        Ok(())
    }

    pub fn set_end(&mut self, location: Location, bounds: &BoundingBox) -> Result<(), OutOfBounds> {
        self.end = Some(checked(location, bounds)?);
        Ok(())
    }

    pub fn clear_start(&mut self) {
        self.start = None;
    }

    pub fn clear_end(&mut self) {
        self.end = None;
    }

    /// Both slots hold a location.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

fn checked(location: Location, bounds: &BoundingBox) -> Result<Location, OutOfBounds> {
    if location.is_valid() && bounds.contains(&location) {
        Ok(location)
    } else {
        Err(OutOfBounds {
            latitude: location.latitude,
            longitude: location.longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> BoundingBox {
        BoundingBox {
            south_west: Location::new(35.0, 139.0),
            north_east: Location::new(36.0, 140.0),
        }
    }

    #[test]
    fn in_box_pick_is_accepted() {
        let mut picker = LocationPicker::default();
        picker
            .set_start(Location::new(35.5, 139.5), &bounds())
            .unwrap();
        assert_eq!(picker.start(), Some(Location::new(35.5, 139.5)));
    }

    #[test]
    fn out_of_box_pick_leaves_the_slot_unchanged() {
        let mut picker = LocationPicker::default();
        picker
            .set_start(Location::new(35.5, 139.5), &bounds())
            .unwrap();

        let rejected = picker.set_start(Location::new(34.9, 139.5), &bounds());
        assert_eq!(
            rejected,
            Err(OutOfBounds {
                latitude: 34.9,
                longitude: 139.5
            })
        );
        assert_eq!(picker.start(), Some(Location::new(35.5, 139.5)));
    }

    #[test]
    fn out_of_box_pick_into_an_unset_slot_keeps_it_unset() {
        let mut picker = LocationPicker::default();
        assert!(picker.set_end(Location::new(36.5, 139.5), &bounds()).is_err());
        assert_eq!(picker.end(), None);
    }

    #[test]
    fn invalid_coordinates_are_rejected_even_when_numeric() {
        let mut picker = LocationPicker::default();
        assert!(picker
            .set_start(Location::new(f64::NAN, 139.5), &bounds())
            .is_err());
        assert_eq!(picker.start(), None);
    }

    #[test]
    fn slots_are_independent() {
        let mut picker = LocationPicker::default();

        // End may be set before start.
        picker.set_end(Location::new(35.2, 139.2), &bounds()).unwrap();
        assert_eq!(picker.start(), None);

        picker
            .set_start(Location::new(35.8, 139.8), &bounds())
            .unwrap();
        assert_eq!(picker.end(), Some(Location::new(35.2, 139.2)));

        picker.clear_end();
        assert_eq!(picker.start(), Some(Location::new(35.8, 139.8)));
        assert_eq!(picker.end(), None);
        assert!(!picker.is_complete());
    }

    #[test]
    fn complete_once_both_slots_are_set() {
        let mut picker = LocationPicker::default();
        assert!(!picker.is_complete());
        picker
            .set_start(Location::new(35.5, 139.5), &bounds())
            .unwrap();
        assert!(!picker.is_complete());
        picker.set_end(Location::new(35.6, 139.6), &bounds()).unwrap();
        assert!(picker.is_complete());
    }
}
