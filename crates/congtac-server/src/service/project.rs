//! Project service
//!
//! Creation, search, dashboards, detail hydration and lifecycle transitions.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use congtac_api::SearchResult;
use congtac_common::error::CongtacError;
use congtac_common::{
    MEMBER_ROLE_OWNER, PROJECT_STATUS_APPROVED, PROJECT_STATUS_COMPLETED, PROJECT_STATUS_PENDING,
    capitalize, project_progress,
};
use congtac_persistence::entity::{
    project_members, project_milestones, project_skills, projects, skills, users,
};
use congtac_persistence::sea_orm::sea_query::{Asterisk, Expr, Func};
use congtac_persistence::sea_orm::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::constants::MEMBER_PREVIEW_LIMIT;

/// Owner block joined onto project listings; the field name `user_info`
/// matches what the web client expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerInfo {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub username: String,
    pub avatar_url: Option<String>,
}

impl From<users::Model> for OwnerInfo {
    fn from(value: users::Model) -> Self {
        Self {
            user_id: value.user_id,
            email: value.email,
            full_name: value.full_name,
            username: value.username,
            avatar_url: value.avatar_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillInfo {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
}

impl From<skills::Model> for SkillInfo {
    fn from(value: skills::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
        }
    }
}

/// New-project payload after request validation
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub project_type: String,
    pub start_date: String,
    pub cover_image_url: Option<String>,
    pub skills: Vec<String>,
    pub milestones: Vec<String>,
}

/// Find a live (non-deleted) project by id
pub async fn find_live(
    db: &DatabaseConnection,
    project_id: i64,
) -> anyhow::Result<Option<projects::Model>> {
    let project = projects::Entity::find_by_id(project_id)
        .filter(projects::Column::DeletedAt.is_null())
        .one(db)
        .await?;

    Ok(project)
}

/// Create a project in "pending" state with its skills, milestones, and the
/// owner membership. Returns the new project id.
pub async fn create(
    db: &DatabaseConnection,
    owner_id: Uuid,
    input: CreateProjectInput,
) -> anyhow::Result<i64> {
    let project = projects::ActiveModel {
        title: Set(input.title),
        description: Set(input.description),
        location: Set(input.location),
        project_type: Set(Some(input.project_type)),
        start_date: Set(Some(input.start_date)),
        cover_image_url: Set(input.cover_image_url),
        owner_id: Set(owner_id),
        status: Set(PROJECT_STATUS_PENDING.to_string()),
        created_at: Set(Some(Utc::now())),
        updated_at: Set(Some(Utc::now())),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // Skills are deduped case-insensitively and created on first use
    let mut seen = HashSet::new();
    let mut skill_ids = Vec::new();
    for raw in &input.skills {
        let name = raw.trim();
        if name.is_empty() || !seen.insert(name.to_lowercase()) {
            continue;
        }

        let skill_id = match find_skill_by_name(db, name).await? {
            Some(skill) => skill.id,
            None => {
                skills::ActiveModel {
                    name: Set(capitalize(name)),
                    created_at: Set(Some(Utc::now())),
                    ..Default::default()
                }
                .insert(db)
                .await?
                .id
            }
        };
        skill_ids.push(skill_id);
    }

    if !skill_ids.is_empty() {
        let links = skill_ids
            .into_iter()
            .map(|skill_id| project_skills::ActiveModel {
                project_id: Set(project.id),
                skill_id: Set(skill_id),
                ..Default::default()
            })
            .collect::<Vec<_>>();
        project_skills::Entity::insert_many(links).exec(db).await?;
    }

    let milestones = input
        .milestones
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .enumerate()
        .map(|(index, title)| project_milestones::ActiveModel {
            project_id: Set(project.id),
            title: Set(title.to_string()),
            description: Set(None),
            order_index: Set(index as i32 + 1),
            ..Default::default()
        })
        .collect::<Vec<_>>();
    if !milestones.is_empty() {
        project_milestones::Entity::insert_many(milestones)
            .exec(db)
            .await?;
    }

    project_members::ActiveModel {
        project_id: Set(project.id),
        user_id: Set(owner_id),
        role: Set(Some(MEMBER_ROLE_OWNER.to_string())),
        joined_at: Set(Some(Utc::now())),
        left_at: Set(None),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(project.id)
}

/// Case-insensitive skill lookup
async fn find_skill_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> anyhow::Result<Option<skills::Model>> {
    let skill = skills::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(skills::Column::Name))).eq(name.to_lowercase()))
        .one(db)
        .await?;

    Ok(skill)
}

/// Project row shaped for search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCard {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub project_type: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub status: String,
    pub created_at: Option<prelude::DateTimeUtc>,
    pub owner_id: Uuid,
    pub user_info: Option<OwnerInfo>,
}

/// Search approved projects, newest first, with owner info joined.
pub async fn search(
    db: &DatabaseConnection,
    query: &str,
    limit: u64,
    offset: u64,
) -> anyhow::Result<SearchResult<ProjectCard>> {
    let base = || {
        let mut select = projects::Entity::find()
            .filter(projects::Column::DeletedAt.is_null())
            .filter(projects::Column::Status.eq(PROJECT_STATUS_APPROVED));

        let term = query.trim();
        if !term.is_empty() {
            select = select.filter(
                Condition::any()
                    .add(projects::Column::Title.contains(term))
                    .add(projects::Column::Description.contains(term))
                    .add(projects::Column::Location.contains(term)),
            );
        }
        select
    };

    let total = base()
        .select_only()
        .column_as(Expr::col(Asterisk).count(), "count")
        .into_tuple::<i64>()
        .one(db)
        .await?
        .unwrap_or_default() as u64;

    let rows = base()
        .order_by_desc(projects::Column::CreatedAt)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await?;

    let owners = load_owner_map(db, rows.iter().map(|p| p.owner_id)).await?;

    let projects = rows
        .into_iter()
        .map(|p| {
            let user_info = owners.get(&p.owner_id).cloned();
            ProjectCard {
                id: p.id,
                title: p.title,
                description: p.description,
                cover_image_url: p.cover_image_url,
                project_type: p.project_type,
                location: p.location,
                start_date: p.start_date,
                status: p.status,
                created_at: p.created_at,
                owner_id: p.owner_id,
                user_info,
            }
        })
        .collect();

    Ok(SearchResult {
        projects,
        total,
        limit,
        offset,
    })
}

async fn load_owner_map(
    db: &DatabaseConnection,
    owner_ids: impl Iterator<Item = Uuid>,
) -> anyhow::Result<HashMap<Uuid, OwnerInfo>> {
    let ids = owner_ids.collect::<HashSet<_>>();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let owners = users::Entity::find()
        .filter(users::Column::UserId.is_in(ids))
        .filter(users::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    Ok(owners
        .into_iter()
        .map(|u| (u.user_id, OwnerInfo::from(u)))
        .collect())
}

/// Compact member entry shown on dashboard cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberAvatar {
    pub user_id: Uuid,
    pub avatar_url: Option<String>,
}

/// Dashboard card with members preview and derived progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWithMembers {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub created_at: Option<prelude::DateTimeUtc>,
    pub members: Vec<MemberAvatar>,
    pub progress: u32,
}

/// The caller's projects, bucketed by lifecycle state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MyProjects {
    pub pending: Vec<ProjectWithMembers>,
    pub approved: Vec<ProjectWithMembers>,
    pub joined: Vec<ProjectWithMembers>,
    pub completed: Vec<ProjectWithMembers>,
}

/// Assemble the "my projects" dashboard for a user.
pub async fn my_projects(db: &DatabaseConnection, user_id: Uuid) -> anyhow::Result<MyProjects> {
    let mut result = MyProjects::default();

    // Projects the user owns
    let owned = projects::Entity::find()
        .filter(projects::Column::OwnerId.eq(user_id))
        .filter(projects::Column::DeletedAt.is_null())
        .order_by_desc(projects::Column::CreatedAt)
        .all(db)
        .await?;

    for project in owned {
        let card = hydrate_card(db, project).await?;
        match card.status.as_str() {
            PROJECT_STATUS_APPROVED => result.approved.push(card),
            PROJECT_STATUS_COMPLETED => result.completed.push(ProjectWithMembers {
                progress: 100,
                ..card
            }),
            _ => result.pending.push(card),
        }
    }

    // Projects the user joined but does not own
    let memberships = project_members::Entity::find()
        .filter(project_members::Column::UserId.eq(user_id))
        .filter(project_members::Column::DeletedAt.is_null())
        .filter(project_members::Column::LeftAt.is_null())
        .all(db)
        .await?;

    if !memberships.is_empty() {
        let project_ids = memberships
            .iter()
            .map(|m| m.project_id)
            .collect::<Vec<_>>();

        let joined = projects::Entity::find()
            .filter(projects::Column::Id.is_in(project_ids))
            .filter(projects::Column::OwnerId.ne(user_id))
            .filter(projects::Column::DeletedAt.is_null())
            .order_by_desc(projects::Column::CreatedAt)
            .all(db)
            .await?;

        for project in joined {
            result.joined.push(hydrate_card(db, project).await?);
        }
    }

    Ok(result)
}

async fn hydrate_card(
    db: &DatabaseConnection,
    project: projects::Model,
) -> anyhow::Result<ProjectWithMembers> {
    let members = member_avatars(db, project.id).await?;
    let milestone_count = project_milestones::Entity::find()
        .filter(project_milestones::Column::ProjectId.eq(project.id))
        .count(db)
        .await?;

    let completed = project.status == PROJECT_STATUS_COMPLETED;

    Ok(ProjectWithMembers {
        id: project.id,
        title: project.title,
        status: project.status,
        created_at: project.created_at,
        members,
        progress: project_progress(milestone_count, completed),
    })
}

/// Up to five active members with their avatars
async fn member_avatars(
    db: &DatabaseConnection,
    project_id: i64,
) -> anyhow::Result<Vec<MemberAvatar>> {
    let memberships = project_members::Entity::find()
        .filter(project_members::Column::ProjectId.eq(project_id))
        .filter(project_members::Column::DeletedAt.is_null())
        .filter(project_members::Column::LeftAt.is_null())
        .limit(MEMBER_PREVIEW_LIMIT)
        .all(db)
        .await?;

    if memberships.is_empty() {
        return Ok(vec![]);
    }

    let member_ids = memberships.iter().map(|m| m.user_id).collect::<Vec<_>>();
    let infos = users::Entity::find()
        .filter(users::Column::UserId.is_in(member_ids))
        .filter(users::Column::DeletedAt.is_null())
        .all(db)
        .await?;

    let avatars = infos
        .into_iter()
        .map(|u| (u.user_id, u.avatar_url))
        .collect::<HashMap<_, _>>();

    Ok(memberships
        .into_iter()
        .filter_map(|m| {
            avatars.get(&m.user_id).map(|avatar_url| MemberAvatar {
                user_id: m.user_id,
                avatar_url: avatar_url.clone(),
            })
        })
        .collect())
}

/// Member entry on the detail page, with membership role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberInfo {
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub username: String,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneInfo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub order_index: i32,
}

/// Everything the project detail page needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: projects::Model,
    pub owner: Option<OwnerInfo>,
    pub project_skills: Vec<SkillInfo>,
    pub members: Vec<MemberInfo>,
    pub milestones: Vec<MilestoneInfo>,
    pub is_owner: bool,
    pub is_member: bool,
}

/// Load the full detail view; None when the project does not exist.
pub async fn detail(
    db: &DatabaseConnection,
    project_id: i64,
    current_user: Option<Uuid>,
) -> anyhow::Result<Option<ProjectDetail>> {
    let Some(project) = find_live(db, project_id).await? else {
        return Ok(None);
    };

    let owner = users::Entity::find_by_id(project.owner_id)
        .filter(users::Column::DeletedAt.is_null())
        .one(db)
        .await?
        .map(OwnerInfo::from);

    let skill_links = project_skills::Entity::find()
        .filter(project_skills::Column::ProjectId.eq(project_id))
        .all(db)
        .await?;

    let project_skills = if skill_links.is_empty() {
        vec![]
    } else {
        let skill_ids = skill_links.iter().map(|l| l.skill_id).collect::<Vec<_>>();
        skills::Entity::find()
            .filter(skills::Column::Id.is_in(skill_ids))
            .all(db)
            .await?
            .into_iter()
            .map(SkillInfo::from)
            .collect()
    };

    let memberships = project_members::Entity::find()
        .filter(project_members::Column::ProjectId.eq(project_id))
        .filter(project_members::Column::DeletedAt.is_null())
        .filter(project_members::Column::LeftAt.is_null())
        .all(db)
        .await?;

    let members = if memberships.is_empty() {
        vec![]
    } else {
        let member_ids = memberships.iter().map(|m| m.user_id).collect::<Vec<_>>();
        let infos = users::Entity::find()
            .filter(users::Column::UserId.is_in(member_ids))
            .filter(users::Column::DeletedAt.is_null())
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.user_id, u))
            .collect::<HashMap<_, _>>();

        memberships
            .iter()
            .filter_map(|m| {
                infos.get(&m.user_id).map(|info| MemberInfo {
                    user_id: info.user_id,
                    full_name: info.full_name.clone(),
                    username: info.username.clone(),
                    avatar_url: info.avatar_url.clone(),
                    role: m.role.clone(),
                })
            })
            .collect()
    };

    let milestones = project_milestones::Entity::find()
        .filter(project_milestones::Column::ProjectId.eq(project_id))
        .order_by_asc(project_milestones::Column::OrderIndex)
        .all(db)
        .await?
        .into_iter()
        .map(|m| MilestoneInfo {
            id: m.id,
            title: m.title,
            description: m.description,
            order_index: m.order_index,
        })
        .collect();

    let is_owner = current_user.is_some_and(|id| id == project.owner_id);
    let is_member = is_owner
        || current_user
            .is_some_and(|id| memberships.iter().any(|m| m.user_id == id));

    Ok(Some(ProjectDetail {
        project,
        owner,
        project_skills,
        members,
        milestones,
        is_owner,
        is_member,
    }))
}

/// Soft-delete a project; only its owner may do so.
pub async fn soft_delete(
    db: &DatabaseConnection,
    project_id: i64,
    requester: Uuid,
) -> anyhow::Result<()> {
    let project = match find_live(db, project_id).await? {
        Some(p) => p,
        None => return Err(CongtacError::ProjectNotExist(project_id).into()),
    };

    if project.owner_id != requester {
        return Err(CongtacError::AccessDenied(format!("project {}", project_id)).into());
    }

    let mut active: projects::ActiveModel = project.into();
    active.deleted_at = Set(Some(Utc::now()));
    active.update(db).await?;

    Ok(())
}

/// Owner marks an approved project completed.
pub async fn complete(
    db: &DatabaseConnection,
    project_id: i64,
    requester: Uuid,
) -> anyhow::Result<()> {
    let project = match find_live(db, project_id).await? {
        Some(p) => p,
        None => return Err(CongtacError::ProjectNotExist(project_id).into()),
    };

    if project.owner_id != requester {
        return Err(CongtacError::AccessDenied(format!("project {}", project_id)).into());
    }

    if project.status != PROJECT_STATUS_APPROVED {
        return Err(CongtacError::IllegalArgument(
            "only approved projects can be completed".to_string(),
        )
        .into());
    }

    let mut active: projects::ActiveModel = project.into();
    active.status = Set(PROJECT_STATUS_COMPLETED.to_string());
    active.updated_at = Set(Some(Utc::now()));
    active.update(db).await?;

    Ok(())
}
