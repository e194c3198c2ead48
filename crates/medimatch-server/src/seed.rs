use anyhow::Result;
use medimatch_common::models::doctor::{
    Availability, DoctorStatus, Education, WorkingHours,
};
use medimatch_db::{DoctorRepo, NewDoctor};
use sqlx::PgPool;

fn weekdays() -> Vec<String> {
    ["monday", "tuesday", "wednesday", "thursday", "friday"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn availability(timezone: &str, start: &str, end: &str, days: Vec<String>) -> Option<Availability> {
    Some(Availability {
        timezone: timezone.to_string(),
        working_hours: Some(WorkingHours {
            start: start.to_string(),
            end: end.to_string(),
        }),
        working_days: days,
    })
}

fn education(degree: &str, university: &str, year: i32) -> Vec<Education> {
    vec![Education {
        degree: degree.to_string(),
        university: university.to_string(),
        year: Some(year),
    }]
}

/// The demo doctor directory inserted on first startup when seeding is
/// enabled.
pub fn sample_doctors() -> Vec<NewDoctor> {
    vec![
        NewDoctor {
            name: "Dr. Sophia Chen".to_string(),
            specialty: "Cardiology AI Specialist".to_string(),
            experience: "8 years".to_string(),
            rating: 4.9,
            consultations: "2.4k+".to_string(),
            response_time: "< 2 min".to_string(),
            status: DoctorStatus::Online,
            avatar: "https://images.unsplash.com/photo-1559839734-2b71ea197ec2".to_string(),
            description: "Specialized in heart-related conditions and cardiovascular health monitoring"
                .to_string(),
            expertise: vec![
                "Heart Disease".to_string(),
                "Blood Pressure".to_string(),
                "Cholesterol".to_string(),
            ],
            education: education("MD Cardiology", "Harvard Medical School", 2015),
            languages: vec!["English".to_string(), "Mandarin".to_string()],
            availability: availability("EST", "09:00", "17:00", weekdays()),
            consultation_fee: 79.99,
            is_verified: true,
            featured: true,
        },
        NewDoctor {
            name: "Dr. Marcus Johnson".to_string(),
            specialty: "Neurology AI Expert".to_string(),
            experience: "12 years".to_string(),
            rating: 4.8,
            consultations: "3.1k+".to_string(),
            response_time: "< 1 min".to_string(),
            status: DoctorStatus::Online,
            avatar: "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d".to_string(),
            description: "Expert in neurological disorders and brain health assessment".to_string(),
            expertise: vec![
                "Migraines".to_string(),
                "Stroke".to_string(),
                "Epilepsy".to_string(),
            ],
            education: education("MD Neurology", "Johns Hopkins University", 2011),
            languages: vec!["English".to_string(), "Spanish".to_string()],
            availability: availability("PST", "08:00", "16:00", weekdays()),
            consultation_fee: 89.99,
            is_verified: true,
            featured: true,
        },
        NewDoctor {
            name: "Dr. Elena Rodriguez".to_string(),
            specialty: "Pediatrics AI Consultant".to_string(),
            experience: "6 years".to_string(),
            rating: 4.9,
            consultations: "1.8k+".to_string(),
            response_time: "< 3 min".to_string(),
            status: DoctorStatus::Busy,
            avatar: "https://images.unsplash.com/photo-1594824947933-d0501ba2fe65".to_string(),
            description: "Dedicated to children's health and developmental monitoring".to_string(),
            expertise: vec![
                "Child Development".to_string(),
                "Vaccinations".to_string(),
                "Common Illnesses".to_string(),
            ],
            education: education("MD Pediatrics", "Stanford University", 2017),
            languages: vec![
                "English".to_string(),
                "Spanish".to_string(),
                "French".to_string(),
            ],
            availability: {
                let mut days = weekdays();
                days.push("saturday".to_string());
                availability("CST", "10:00", "18:00", days)
            },
            consultation_fee: 69.99,
            is_verified: true,
            featured: false,
        },
        NewDoctor {
            name: "Dr. James Wilson".to_string(),
            specialty: "Dermatology AI Specialist".to_string(),
            experience: "10 years".to_string(),
            rating: 4.7,
            consultations: "2.7k+".to_string(),
            response_time: "< 2 min".to_string(),
            status: DoctorStatus::Online,
            avatar: "https://images.unsplash.com/photo-1582750433449-648ed127bb54".to_string(),
            description: "Skin condition analysis and treatment recommendations".to_string(),
            expertise: vec![
                "Acne".to_string(),
                "Eczema".to_string(),
                "Skin Cancer".to_string(),
            ],
            education: education("MD Dermatology", "Mayo Medical School", 2013),
            languages: vec!["English".to_string()],
            availability: availability("EST", "08:30", "16:30", weekdays()),
            consultation_fee: 74.99,
            is_verified: true,
            featured: true,
        },
        NewDoctor {
            name: "Dr. Sarah Thompson".to_string(),
            specialty: "Oncology AI Specialist".to_string(),
            experience: "9 years".to_string(),
            rating: 4.9,
            consultations: "2.1k+".to_string(),
            response_time: "< 3 min".to_string(),
            status: DoctorStatus::Online,
            avatar: "https://images.unsplash.com/photo-1551601651-2a8555f1a136".to_string(),
            description: "Cancer diagnosis and treatment planning specialist".to_string(),
            expertise: vec![
                "Cancer Screening".to_string(),
                "Treatment Plans".to_string(),
                "Follow-up Care".to_string(),
            ],
            education: education("MD Oncology", "MD Anderson Cancer Center", 2014),
            languages: vec!["English".to_string(), "German".to_string()],
            availability: availability("CST", "07:00", "15:00", weekdays()),
            consultation_fee: 99.99,
            is_verified: true,
            featured: true,
        },
    ]
}

/// Insert the demo directory if the doctor table is empty.
/// Returns the number of profiles inserted.
pub async fn seed_demo_doctors(pool: &PgPool) -> Result<usize> {
    if DoctorRepo::count(pool).await? > 0 {
        tracing::info!("Doctor directory not empty, skipping demo seed");
        return Ok(0);
    }

    let doctors = sample_doctors();
    for doctor in &doctors {
        DoctorRepo::create(pool, doctor).await?;
    }
    tracing::info!("Seeded {} demo doctors", doctors.len());
    Ok(doctors.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_doctors_well_formed() {
        let doctors = sample_doctors();
        assert_eq!(doctors.len(), 5);
        for doctor in &doctors {
            assert!(doctor.avatar.starts_with("http"));
            assert!(doctor.rating >= 0.0 && doctor.rating <= 5.0);
            assert!(doctor.consultation_fee >= 0.0);
            assert!(!doctor.expertise.is_empty());
        }
    }

    #[test]
    fn test_sample_specialties_cover_keyword_table() {
        let specialties: Vec<String> = sample_doctors()
            .iter()
            .map(|d| d.specialty.to_lowercase())
            .collect();
        for field in ["cardiology", "neurology", "pediatrics", "dermatology", "oncology"] {
            assert!(
                specialties.iter().any(|s| s.contains(field)),
                "no seed doctor for {field}"
            );
        }
    }
}
