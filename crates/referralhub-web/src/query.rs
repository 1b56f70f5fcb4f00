use anyhow::{Result, anyhow, bail};
use graphql_client::GraphQLQuery;

use referralhub_core::form::{CandidateInput, LoginInput, ReferralInput, RegisterInput};
use referralhub_core::models::{Candidate, Referral, ReferralStatus, Referrer, Role, User};
use referralhub_schema::*;

use crate::{storage::Session, utils::graphql_host};

async fn post_graphql<Q>(var: Q::Variables, token: Option<String>) -> Result<Q::ResponseData>
where
    Q: GraphQLQuery,
{
    let url = graphql_host();
    let request_body = Q::build_query(var);

    let client = reqwest::Client::new();

    let mut req = client.post(url);
    if let Some(token) = token.filter(|token| !token.is_empty()) {
        req = req.header("Authorization", format!("Bearer {}", token));
    }
    let res = req.json(&request_body).send().await?;
    let status = res.status();
    let response_body: graphql_client::Response<Q::ResponseData> = match res.json().await {
        Ok(body) => body,
        Err(e) if !status.is_success() => {
            debug!("unreadable error response: {}", e);
            bail!("request failed with status {}", status);
        }
        Err(e) => return Err(e.into()),
    };

    match (response_body.data, response_body.errors) {
        (_, Some(errors)) if !errors.is_empty() => Err(anyhow!(
            errors
                .iter()
                .map(|e| e.message.clone())
                .collect::<Vec<String>>()
                .join(", ")
        )),
        (Some(data), _) => Ok(data),
        _ => Err(anyhow!("no data")),
    }
}

macro_rules! role_from {
    ($module:ident, $role:expr) => {
        match $role {
            $module::Role::EMPLOYEE => Ok(Role::Employee),
            $module::Role::HR => Ok(Role::Hr),
            $module::Role::Other(other) => Err(anyhow!("unexpected role {}", other)),
        }
    };
}

macro_rules! status_from {
    ($module:ident, $status:expr) => {
        match $status {
            $module::ReferralStatus::PENDING => Ok(ReferralStatus::Pending),
            $module::ReferralStatus::HIRED => Ok(ReferralStatus::Hired),
            $module::ReferralStatus::REJECTED => Ok(ReferralStatus::Rejected),
            $module::ReferralStatus::Other(other) => {
                Err(anyhow!("unexpected referral status {}", other))
            }
        }
    };
}

pub async fn login(input: LoginInput) -> Result<(String, User)> {
    let var = login::Variables {
        email: input.email,
        password: input.password,
    };
    let data = post_graphql::<Login>(var, None).await?;
    let user = data.login.user;

    Ok((
        data.login.token,
        User {
            id: user.id,
            name: user.name,
            email: user.email,
            role: role_from!(login, user.role)?,
        },
    ))
}

pub async fn register(input: RegisterInput) -> Result<(String, User)> {
    let var = register::Variables {
        name: input.name,
        email: input.email,
        password: input.password,
        role: match input.role {
            Role::Employee => register::Role::EMPLOYEE,
            Role::Hr => register::Role::HR,
        },
    };
    let data = post_graphql::<Register>(var, None).await?;
    let user = data.register.user;

    Ok((
        data.register.token,
        User {
            id: user.id,
            name: user.name,
            email: user.email,
            role: role_from!(register, user.role)?,
        },
    ))
}

pub async fn fetch_me(session: &Session) -> Result<User> {
    let var = me::Variables {};
    let user = post_graphql::<Me>(var, session.token()).await?.me;

    Ok(User {
        id: user.id,
        name: user.name,
        email: user.email,
        role: role_from!(me, user.role)?,
    })
}

pub async fn create_candidate(session: &Session, input: CandidateInput) -> Result<Candidate> {
    let var = create_candidate::Variables {
        name: input.name,
        email: input.email,
        experience_years: input.experience_years,
    };
    let candidate = post_graphql::<CreateCandidate>(var, session.token())
        .await?
        .create_candidate;

    Ok(Candidate {
        id: candidate.id,
        name: candidate.name,
        email: candidate.email,
        experience_years: Some(candidate.experience_years),
    })
}

pub async fn create_referral(session: &Session, input: ReferralInput) -> Result<Referral> {
    let var = create_referral::Variables {
        candidate_id: input.candidate_id,
    };
    let referral = post_graphql::<CreateReferral>(var, session.token())
        .await?
        .create_referral;

    Ok(Referral {
        id: referral.id,
        status: status_from!(create_referral, referral.status)?,
        candidate: Candidate {
            id: referral.candidate.id,
            name: referral.candidate.name,
            email: referral.candidate.email,
            experience_years: None,
        },
        referred_by: Referrer {
            id: referral.referred_by.id,
            name: referral.referred_by.name,
            email: None,
        },
    })
}

/// Returns the status the server stored.
pub async fn update_referral_status(
    session: &Session,
    referral_id: String,
    status: ReferralStatus,
) -> Result<ReferralStatus> {
    let var = update_referral_status::Variables {
        referral_id,
        status: match status {
            ReferralStatus::Pending => update_referral_status::ReferralStatus::PENDING,
            ReferralStatus::Hired => update_referral_status::ReferralStatus::HIRED,
            ReferralStatus::Rejected => update_referral_status::ReferralStatus::REJECTED,
        },
    };
    let referral = post_graphql::<UpdateReferralStatus>(var, session.token())
        .await?
        .update_referral_status;

    status_from!(update_referral_status, referral.status)
}

pub async fn fetch_my_referrals(session: &Session) -> Result<Vec<Referral>> {
    let var = my_referrals::Variables {};
    let data = post_graphql::<MyReferrals>(var, session.token()).await?;

    data.my_referrals
        .into_iter()
        .map(|referral| {
            Ok(Referral {
                id: referral.id,
                status: status_from!(my_referrals, referral.status)?,
                candidate: Candidate {
                    id: referral.candidate.id,
                    name: referral.candidate.name,
                    email: referral.candidate.email,
                    experience_years: Some(referral.candidate.experience_years),
                },
                referred_by: Referrer {
                    id: referral.referred_by.id,
                    name: referral.referred_by.name,
                    email: None,
                },
            })
        })
        .collect()
}

pub async fn fetch_all_referrals(session: &Session) -> Result<Vec<Referral>> {
    let var = all_referrals::Variables {};
    let data = post_graphql::<AllReferrals>(var, session.token()).await?;

    data.all_referrals
        .into_iter()
        .map(|referral| {
            Ok(Referral {
                id: referral.id,
                status: status_from!(all_referrals, referral.status)?,
                candidate: Candidate {
                    id: referral.candidate.id,
                    name: referral.candidate.name,
                    email: referral.candidate.email,
                    experience_years: Some(referral.candidate.experience_years),
                },
                referred_by: Referrer {
                    id: referral.referred_by.id,
                    name: referral.referred_by.name,
                    email: Some(referral.referred_by.email),
                },
            })
        })
        .collect()
}
