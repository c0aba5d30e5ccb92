//! Profile service
//!
//! Public profiles, the profile editor, the skill catalogue, reviews, and
//! the featured-profile ranking on the homepage.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use congtac_common::error::CongtacError;
use congtac_common::{PROJECT_STATUS_PENDING, split_lines};
use congtac_persistence::entity::{
    project_members, projects, reviews, skills, user_profiles, user_skills, users,
};
use congtac_persistence::sea_orm::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::constants::{
    DEFAULT_AVATAR_URL, FEATURED_CANDIDATE_POOL, FEATURED_FALLBACK_LIMIT, FEATURED_PROFILES_LIMIT,
    FEATURED_SKILLS_SHOWN, PROFILE_PROJECTS_LIMIT, PROFILE_REVIEWS_LIMIT,
};
use super::project::SkillInfo;

/// Public account fields (never the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublicInfo {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub avatar_url: Option<String>,
    pub created_at: Option<prelude::DateTimeUtc>,
}

impl From<users::Model> for UserPublicInfo {
    fn from(value: users::Model) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            email: value.email,
            full_name: value.full_name,
            role: value.role,
            avatar_url: value.avatar_url,
            created_at: value.created_at,
        }
    }
}

/// Extended profile sections; list columns stay raw JSON text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSections {
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub address: Option<String>,
    pub portfolio_url: Option<String>,
    pub interests: Option<String>,
    pub experiences: Option<String>,
    pub projects: Option<String>,
    pub certifications: Option<String>,
}

impl From<user_profiles::Model> for ProfileSections {
    fn from(value: user_profiles::Model) -> Self {
        Self {
            phone: value.phone,
            bio: value.bio,
            address: value.address,
            portfolio_url: value.portfolio_url,
            interests: value.interests,
            experiences: value.experiences,
            projects: value.projects,
            certifications: value.certifications,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillWithLevel {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub title: String,
    pub cover_image_url: Option<String>,
    pub project_type: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewerInfo {
    pub full_name: Option<String>,
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: i64,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub reviewer_id: Uuid,
    pub created_at: Option<prelude::DateTimeUtc>,
    pub reviewer_info: Option<ReviewerInfo>,
}

/// Everything the public profile page needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileData {
    pub user_info: UserPublicInfo,
    pub user_profile: Option<ProfileSections>,
    pub user_skills: Vec<SkillWithLevel>,
    pub user_projects: Vec<ProjectSummary>,
    pub reviews: Vec<ReviewView>,
    pub is_owner: bool,
}

/// Load a public profile by username; None when no live account matches.
pub async fn get_by_username(
    db: &DatabaseConnection,
    username: &str,
    current_user: Option<Uuid>,
) -> anyhow::Result<Option<UserProfileData>> {
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .filter(users::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    let Some(user) = user else {
        return Ok(None);
    };

    let user_id = user.user_id;
    let is_owner = current_user.is_some_and(|id| id == user_id);

    let user_profile = user_profiles::Entity::find()
        .filter(user_profiles::Column::UserId.eq(user_id))
        .filter(user_profiles::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .map(ProfileSections::from);

    let user_skills = skills_with_level(db, user_id).await?;

    // Owned projects that already passed moderation
    let user_projects = projects::Entity::find()
        .filter(projects::Column::OwnerId.eq(user_id))
        .filter(projects::Column::DeletedAt.is_null())
        .filter(projects::Column::Status.ne(PROJECT_STATUS_PENDING))
        .order_by_desc(projects::Column::CreatedAt)
        .limit(PROFILE_PROJECTS_LIMIT)
        .all(db)
        .await?
        .into_iter()
        .map(|p| ProjectSummary {
            id: p.id,
            title: p.title,
            cover_image_url: p.cover_image_url,
            project_type: p.project_type,
            status: p.status,
        })
        .collect();

    let review_rows = reviews::Entity::find()
        .filter(reviews::Column::RevieweeId.eq(user_id))
        .filter(reviews::Column::DeletedAt.is_null())
        .order_by_desc(reviews::Column::CreatedAt)
        .limit(PROFILE_REVIEWS_LIMIT)
        .all(db)
        .await?;

    let reviews = if review_rows.is_empty() {
        vec![]
    } else {
        let reviewer_ids = review_rows.iter().map(|r| r.reviewer_id).collect::<Vec<_>>();
        let reviewers = users::Entity::find()
            .filter(users::Column::UserId.is_in(reviewer_ids))
            .filter(users::Column::DeletedAt.is_null())
            .all(db)
            .await?
            .into_iter()
            .map(|u| {
                (
                    u.user_id,
                    ReviewerInfo {
                        full_name: u.full_name,
                        username: u.username,
                        avatar_url: u.avatar_url,
                    },
                )
            })
            .collect::<HashMap<_, _>>();

        review_rows
            .into_iter()
            .map(|r| ReviewView {
                id: r.id,
                rating: r.rating,
                comment: r.comment,
                reviewer_id: r.reviewer_id,
                created_at: r.created_at,
                reviewer_info: reviewers.get(&r.reviewer_id).cloned(),
            })
            .collect()
    };

    Ok(Some(UserProfileData {
        user_info: UserPublicInfo::from(user),
        user_profile,
        user_skills,
        user_projects,
        reviews,
        is_owner,
    }))
}

async fn skills_with_level(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> anyhow::Result<Vec<SkillWithLevel>> {
    let links = user_skills::Entity::find()
        .filter(user_skills::Column::UserId.eq(user_id))
        .filter(user_skills::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    if links.is_empty() {
        return Ok(vec![]);
    }

    let levels = links
        .iter()
        .map(|l| (l.skill_id, l.level.clone()))
        .collect::<HashMap<_, _>>();
    let skill_ids = links.iter().map(|l| l.skill_id).collect::<Vec<_>>();

    let rows = skills::Entity::find()
        .filter(skills::Column::Id.is_in(skill_ids))
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|s| SkillWithLevel {
            level: levels.get(&s.id).cloned().flatten(),
            id: s.id,
            name: s.name,
            category: s.category,
        })
        .collect())
}

/// Profile editor payload after request validation
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub address: Option<String>,
    pub portfolio_url: Option<String>,
    pub interests: Option<String>,
    pub experiences: Option<String>,
    pub projects: Option<String>,
    pub certifications: Option<String>,
    pub skill_ids: Vec<i64>,
}

/// Newline-separated textarea content as a JSON array string
fn lines_as_json(text: Option<&String>) -> Option<String> {
    text.map(|t| serde_json::to_string(&split_lines(t)).unwrap_or_else(|_| "[]".to_string()))
}

/// Apply a profile update: account fields, profile upsert, and the skill
/// set diff (removed skills are soft-deleted). Returns the username for the
/// client-side redirect.
pub async fn update(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: UpdateProfileInput,
) -> anyhow::Result<String> {
    let user = users::Entity::find_by_id(user_id)
        .filter(users::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(CongtacError::UserNotExist(user_id.to_string()).into()),
    };

    let username = user.username.clone();

    let full_name_changed =
        input.full_name.is_some() && input.full_name != user.full_name;
    let avatar_changed = input.avatar_url.is_some() && input.avatar_url != user.avatar_url;

    if full_name_changed || avatar_changed {
        let mut active: users::ActiveModel = user.into();
        if full_name_changed {
            active.full_name = Set(input.full_name.clone());
        }
        if avatar_changed {
            active.avatar_url = Set(input.avatar_url.clone());
        }
        active.updated_at = Set(Some(Utc::now()));
        active.update(db).await?;
    }

    let interests = lines_as_json(input.interests.as_ref());
    let experiences = lines_as_json(input.experiences.as_ref());
    let project_lines = lines_as_json(input.projects.as_ref());
    let certifications = lines_as_json(input.certifications.as_ref());

    let existing_profile = user_profiles::Entity::find()
        .filter(user_profiles::Column::UserId.eq(user_id))
        .filter(user_profiles::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    match existing_profile {
        Some(profile) => {
            let mut active: user_profiles::ActiveModel = profile.into();
            active.phone = Set(input.phone.clone());
            active.bio = Set(input.bio.clone());
            active.address = Set(input.address.clone());
            active.portfolio_url = Set(input.portfolio_url.clone());
            active.interests = Set(interests);
            active.experiences = Set(experiences);
            active.projects = Set(project_lines);
            active.certifications = Set(certifications);
            active.update(db).await?;
        }
        None => {
            user_profiles::ActiveModel {
                user_id: Set(user_id),
                phone: Set(input.phone.clone()),
                bio: Set(input.bio.clone()),
                address: Set(input.address.clone()),
                portfolio_url: Set(input.portfolio_url.clone()),
                interests: Set(interests),
                experiences: Set(experiences),
                projects: Set(project_lines),
                certifications: Set(certifications),
                deleted_at: Set(None),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    reconcile_skills(db, user_id, &input.skill_ids).await?;

    Ok(username)
}

/// Diff the stored skill set against the submitted one
async fn reconcile_skills(
    db: &DatabaseConnection,
    user_id: Uuid,
    skill_ids: &[i64],
) -> anyhow::Result<()> {
    let current = user_skills::Entity::find()
        .filter(user_skills::Column::UserId.eq(user_id))
        .filter(user_skills::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    let current_ids = current.iter().map(|s| s.skill_id).collect::<HashSet<_>>();
    let new_ids = skill_ids.iter().copied().collect::<HashSet<_>>();

    let to_delete = current_ids
        .difference(&new_ids)
        .copied()
        .collect::<Vec<_>>();
    if !to_delete.is_empty() {
        user_skills::Entity::update_many()
            .col_expr(
                user_skills::Column::DeletedAt,
                prelude::Expr::value(Some(Utc::now())),
            )
            .filter(user_skills::Column::UserId.eq(user_id))
            .filter(user_skills::Column::SkillId.is_in(to_delete))
            .filter(user_skills::Column::DeletedAt.is_null())
            .exec(db)
            .await?;
    }

    let to_insert = new_ids
        .difference(&current_ids)
        .map(|skill_id| user_skills::ActiveModel {
            user_id: Set(user_id),
            skill_id: Set(*skill_id),
            level: Set(None),
            deleted_at: Set(None),
            ..Default::default()
        })
        .collect::<Vec<_>>();
    if !to_insert.is_empty() {
        user_skills::Entity::insert_many(to_insert).exec(db).await?;
    }

    Ok(())
}

/// The whole skill catalogue, ordered by name
pub async fn all_skills(db: &DatabaseConnection) -> anyhow::Result<Vec<SkillInfo>> {
    let rows = skills::Entity::find()
        .order_by_asc(skills::Column::Name)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(SkillInfo::from).collect())
}

/// Homepage card for a top-rated member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedProfile {
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub skills: Vec<String>,
    pub rating: u32,
    pub username: String,
}

/// Rank users by average review rating (ties broken by review count) and
/// shape the top entries for the homepage. Falls back to the first few
/// accounts when nobody has reviews yet.
pub async fn featured(db: &DatabaseConnection) -> anyhow::Result<Vec<FeaturedProfile>> {
    let candidates = users::Entity::find()
        .filter(users::Column::DeletedAt.is_null())
        .limit(FEATURED_CANDIDATE_POOL)
        .all(db)
        .await?;

    if candidates.is_empty() {
        return Ok(vec![]);
    }

    let candidate_ids = candidates.iter().map(|u| u.user_id).collect::<Vec<_>>();
    let review_rows = reviews::Entity::find()
        .filter(reviews::Column::RevieweeId.is_in(candidate_ids))
        .filter(reviews::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    let mut ratings: HashMap<Uuid, (i64, u64)> = HashMap::new();
    for review in review_rows {
        let Some(rating) = review.rating else {
            continue;
        };
        let entry = ratings.entry(review.reviewee_id).or_insert((0, 0));
        entry.0 += rating as i64;
        entry.1 += 1;
    }

    let mut ranked = candidates
        .iter()
        .map(|user| {
            let (avg, count) = match ratings.get(&user.user_id) {
                Some((sum, count)) if *count > 0 => (*sum as f64 / *count as f64, *count),
                _ => (0.0, 0),
            };
            (user, avg, count)
        })
        .filter(|(_, _, count)| *count > 0)
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.2.cmp(&a.2))
    });
    ranked.truncate(FEATURED_PROFILES_LIMIT);

    if ranked.is_empty() {
        ranked = candidates
            .iter()
            .take(FEATURED_FALLBACK_LIMIT)
            .map(|user| (user, 0.0, 0))
            .collect();
    }

    let featured_ids = ranked.iter().map(|(u, _, _)| u.user_id).collect::<Vec<_>>();
    let skill_names = skill_names_by_user(db, &featured_ids).await?;

    Ok(ranked
        .into_iter()
        .map(|(user, avg, _)| {
            let skills = skill_names.get(&user.user_id).cloned().unwrap_or_default();
            let role = skills
                .first()
                .map(|skill| format!("{} Developer", skill))
                .unwrap_or_else(|| "Developer".to_string());

            FeaturedProfile {
                name: user
                    .full_name
                    .clone()
                    .unwrap_or_else(|| user.username.clone()),
                role,
                avatar: user
                    .avatar_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
                skills: skills.into_iter().take(FEATURED_SKILLS_SHOWN).collect(),
                rating: if avg > 0.0 { avg.round() as u32 } else { 0 },
                username: user.username.clone(),
            }
        })
        .collect())
}

async fn skill_names_by_user(
    db: &DatabaseConnection,
    user_ids: &[Uuid],
) -> anyhow::Result<HashMap<Uuid, Vec<String>>> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = user_skills::Entity::find()
        .filter(user_skills::Column::UserId.is_in(user_ids.to_vec()))
        .filter(user_skills::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    let skill_ids = links
        .iter()
        .map(|l| l.skill_id)
        .collect::<HashSet<_>>();
    let names = skills::Entity::find()
        .filter(skills::Column::Id.is_in(skill_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect::<HashMap<_, _>>();

    let mut result: HashMap<Uuid, Vec<String>> = HashMap::new();
    for link in links {
        if let Some(name) = names.get(&link.skill_id) {
            result.entry(link.user_id).or_default().push(name.clone());
        }
    }

    Ok(result)
}

/// Review submission payload
#[derive(Debug, Clone)]
pub struct SubmitReviewInput {
    pub project_id: i64,
    pub reviewee_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Submit a review; both parties must be active members of the project and
/// self-reviews are rejected.
pub async fn submit_review(
    db: &DatabaseConnection,
    reviewer_id: Uuid,
    input: SubmitReviewInput,
) -> anyhow::Result<i64> {
    if reviewer_id == input.reviewee_id {
        return Err(
            CongtacError::IllegalArgument("cannot review yourself".to_string()).into(),
        );
    }

    let project = super::project::find_live(db, input.project_id).await?;
    if project.is_none() {
        return Err(CongtacError::ProjectNotExist(input.project_id).into());
    }

    for user_id in [reviewer_id, input.reviewee_id] {
        let member = project_members::Entity::find()
            .filter(project_members::Column::ProjectId.eq(input.project_id))
            .filter(project_members::Column::UserId.eq(user_id))
            .filter(project_members::Column::DeletedAt.is_null())
            .filter(project_members::Column::LeftAt.is_null())
            .one(db)
            .await?;

        if member.is_none() {
            return Err(CongtacError::AccessDenied(format!(
                "user {} is not a member of project {}",
                user_id, input.project_id
            ))
            .into());
        }
    }

    let review = reviews::ActiveModel {
        project_id: Set(input.project_id),
        reviewer_id: Set(reviewer_id),
        reviewee_id: Set(input.reviewee_id),
        rating: Set(Some(input.rating)),
        comment: Set(input.comment),
        created_at: Set(Some(Utc::now())),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(review.id)
}
