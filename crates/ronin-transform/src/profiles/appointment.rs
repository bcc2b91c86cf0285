use ronin_model::Appointment;
use ronin_model::ronin::profile_url;
use ronin_validate::r4::R4AppointmentValidator;
use ronin_validate::ResourceValidator;

use crate::profile::Profile;

/// Ronin Appointment. Qualifies every Appointment; only the shared Ronin rules apply.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoninAppointment;

impl Profile<Appointment> for RoninAppointment {
    fn name(&self) -> &'static str {
        "RoninAppointment"
    }

    fn profile_url(&self) -> &'static str {
        profile_url::APPOINTMENT
    }

    fn qualifies(&self, _resource: &Appointment) -> bool {
        true
    }

    fn standard_validator(&self) -> &dyn ResourceValidator<Appointment> {
        &R4AppointmentValidator
    }
}
